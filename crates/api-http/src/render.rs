//! Server-rendered list page
//!
//! Plain HTML forms only: every button posts back to the current URL with an
//! `intent` field, so the page works without any client-side script.

use todo_core::domain::Todo;

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center;
       padding: 1.5rem; box-sizing: border-box; font-family: system-ui, sans-serif;
       background: linear-gradient(to bottom left, #14b8a6, #1e3a8a); }
.card { width: 100%; max-width: 36rem; padding: 2rem; border-radius: 1.5rem;
        background: rgba(255, 255, 255, 0.5); border: 1px solid rgba(255, 255, 255, 0.4);
        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25); }
h1 { margin: 0 0 1.5rem; text-align: center; font-size: 2.25rem; font-weight: 800; color: #111827; }
.create { display: flex; gap: 1rem; padding: 1rem; border-radius: 1rem; background: rgba(255, 255, 255, 0.3); }
.create input { flex: 1; padding: 0.5rem 1rem; font-size: 1.125rem; background: transparent; border: none; }
.create button { padding: 0.75rem 1.5rem; border: none; border-radius: 0.75rem; background: #0d9488; color: #fff; }
ul { list-style: none; margin: 1.5rem 0 0; padding: 0; }
li { display: flex; align-items: center; justify-content: space-between; margin-top: 1rem; padding: 1rem;
     border-radius: 0.75rem; background: rgba(255, 255, 255, 0.4); }
li form.toggle { flex: 1; }
li form.toggle button { width: 100%; text-align: left; font-size: 1.125rem; background: none; border: none; cursor: pointer; }
li form.delete button { font-size: 1.25rem; background: none; border: none; color: #ef4444; cursor: pointer; }
.done { text-decoration: line-through; color: #6b7280; }
"#;

/// Render the full page for a list
pub fn list_page(todos: &[Todo]) -> String {
    let mut items = String::new();
    for todo in todos {
        items.push_str(&todo_item(todo));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>My Tasks</title>
<style>{STYLE}</style>
</head>
<body>
<div class="card">
<h1>My Tasks</h1>
<form method="post" class="create">
<input type="text" name="text" placeholder="What needs to be done?">
<button type="submit" name="intent" value="create">&#x2795;</button>
</form>
<ul>
{items}</ul>
</div>
</body>
</html>
"#
    )
}

fn todo_item(todo: &Todo) -> String {
    let id = escape_html(&todo.id);
    let text = escape_html(&todo.text);
    let class = if todo.completed { r#" class="done""# } else { "" };

    format!(
        r#"<li>
<form method="post" class="toggle">
<input type="hidden" name="id" value="{id}">
<button type="submit" name="intent" value="toggle"><span{class}>{text}</span></button>
</form>
<form method="post" class="delete">
<input type="hidden" name="id" value="{id}">
<button type="submit" name="intent" value="delete">&#x1F5D1;&#xFE0F;</button>
</form>
</li>
"#
    )
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
