//! Todo CLI - Command-line client for the todo list server

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{redirect, Client, StatusCode, Url};
use serde::Deserialize;
use tabled::{Table, Tabled};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8787";
const JSON: &str = "application/json";
const HEALTH_SEGMENT: &str = "healthz";

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Todo list CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server URL
    #[arg(long, env = "TODO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new list and print its id
    New,

    /// Show the tasks of a list
    List {
        /// List id
        list: String,
    },

    /// Add a task
    Add {
        /// List id
        list: String,

        /// Task text
        text: String,
    },

    /// Flip a task between open and done
    Toggle {
        /// List id
        list: String,

        /// Task id
        id: String,
    },

    /// Remove a task
    Delete {
        /// List id
        list: String,

        /// Task id
        id: String,
    },

    /// Show server status
    Status,
}

#[derive(Deserialize)]
struct ListResponse {
    todos: Vec<TodoItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoItem {
    id: String,
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    created_at: i64,
}

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "Done")]
    done: &'static str,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Created (ms)")]
    created_at: i64,
}

impl From<TodoItem> for TodoRow {
    fn from(todo: TodoItem) -> Self {
        Self {
            done: if todo.completed { "✓" } else { " " },
            text: todo.text,
            id: todo.id,
            created_at: todo.created_at,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

struct TodoClient {
    base_url: Url,
    http: Client,
}

impl TodoClient {
    fn new(base_url: &str) -> Result<Self> {
        // Redirects are part of the protocol (new list), never follow them
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = Url::parse(base_url).context("Invalid server URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid server URL: {}", base_url);
        }
        Ok(Self { base_url, http })
    }

    /// Server URL with one extra path segment (percent-encoded)
    fn endpoint(&self, segment: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Invalid server URL: {}", self.base_url))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn list_url(&self, list_id: &str) -> Result<Url> {
        if list_id.is_empty() {
            anyhow::bail!("List id must not be empty");
        }
        if list_id == HEALTH_SEGMENT {
            anyhow::bail!("\"{}\" is reserved by the server", HEALTH_SEGMENT);
        }
        self.endpoint(list_id)
    }

    async fn new_list(&self) -> Result<String> {
        let response = self
            .http
            .get(self.endpoint("")?)
            .send()
            .await
            .context("Failed to connect to server")?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| anyhow::anyhow!("Server did not redirect to a new list"))?;
        Ok(location.trim_start_matches('/').to_string())
    }

    async fn list(&self, list_id: &str) -> Result<Vec<TodoItem>> {
        let response = self
            .http
            .get(self.list_url(list_id)?)
            .header(ACCEPT, JSON)
            .send()
            .await
            .context("Failed to connect to server")?;
        let response = check(response).await?;
        let body: ListResponse = response.json().await.context("Failed to parse response")?;
        Ok(body.todos)
    }

    async fn submit(&self, list_id: &str, fields: &[(&str, &str)]) -> Result<()> {
        let response = self
            .http
            .post(self.list_url(list_id)?)
            .header(ACCEPT, JSON)
            .form(fields)
            .send()
            .await
            .context("Failed to connect to server")?;
        check(response).await?;
        Ok(())
    }

    async fn health(&self) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_SEGMENT)?)
            .send()
            .await
            .context("Failed to connect to server")?;
        let response = check(response).await?;
        response.json().await.context("Failed to parse response")
    }
}

/// Turn a non-2xx response into an error carrying the server's message
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    if status == StatusCode::BAD_REQUEST {
        anyhow::bail!("Rejected: {}", message);
    }
    anyhow::bail!("Server error ({}): {}", status.as_u16(), message)
}

fn print_list(list_id: &str, todos: Vec<TodoItem>) {
    println!("{}", format!("Tasks in {}", list_id).cyan().bold());
    println!();

    if todos.is_empty() {
        println!("{}", "No tasks yet".yellow());
        return;
    }

    let open = todos.iter().filter(|t| !t.completed).count();
    let rows: Vec<TodoRow> = todos.into_iter().map(TodoRow::from).collect();
    println!("{}", Table::new(rows));
    println!();
    println!("  {} {} open", "•".bold(), open);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = TodoClient::new(&cli.server_url)?;

    match cli.command {
        Commands::New => {
            let list_id = client.new_list().await?;
            println!("{}", "✓ New list created".green().bold());
            println!("{}", list_id);
        }

        Commands::List { list } => {
            let todos = client.list(&list).await?;
            print_list(&list, todos);
        }

        Commands::Add { list, text } => {
            client
                .submit(&list, &[("intent", "create"), ("text", text.as_str())])
                .await?;
            println!("{}", format!("✓ Added \"{}\"", text).green().bold());
        }

        Commands::Toggle { list, id } => {
            client
                .submit(&list, &[("intent", "toggle"), ("id", id.as_str())])
                .await?;
            println!("{}", format!("✓ Task {} toggled", id).green().bold());
        }

        Commands::Delete { list, id } => {
            client
                .submit(&list, &[("intent", "delete"), ("id", id.as_str())])
                .await?;
            println!("{}", format!("✓ Task {} deleted", id).green().bold());
        }

        Commands::Status => {
            println!("{}", "Server Status".cyan().bold());
            println!();

            match client.health().await {
                Ok(health) => {
                    println!("  {} {}", "Server URL:".bold(), cli.server_url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), health["version"]);
                }
                Err(e) => {
                    println!("  {} {}", "Server URL:".bold(), cli.server_url);
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
