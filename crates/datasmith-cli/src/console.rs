//! Interactive prompt loop
//!
//! The stand-in caller for the external agent loop: it parses each input
//! line into one of a closed set of typed commands, converts the command to
//! a [`ToolCall`], validates it, and dispatches it through the executor. The
//! decision of *which* operation to run stays with the caller; the tools only
//! see well-formed calls.

use colored::Colorize;
use datasmith_core::error::{DatasmithError, DatasmithResult};
use datasmith_core::store::DatasetStore;
use datasmith_core::tools::{ToolCall, ToolExecutor};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// The closed command set accepted at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Load { path: String, name: String },
    Describe { name: String },
    Clean { name: String },
    Filter { name: String, query: String, output: String },
    Schema { name: String },
    Datasets,
    Tools,
    Help,
    Exit,
}

impl ReplCommand {
    /// Parse a tokenized input line into a command.
    pub fn parse(tokens: &[String]) -> Result<Self, String> {
        let usage = |text: &str| format!("Usage: {text}");
        let command = tokens.first().map(String::as_str).unwrap_or_default();

        match (command, &tokens[1..]) {
            ("load", [path, name]) => Ok(Self::Load {
                path: path.clone(),
                name: name.clone(),
            }),
            ("load", _) => Err(usage("load <file_path> <dataset_name>")),
            ("describe", [name]) => Ok(Self::Describe { name: name.clone() }),
            ("describe", _) => Err(usage("describe <dataset_name>")),
            ("clean", [name]) => Ok(Self::Clean { name: name.clone() }),
            ("clean", _) => Err(usage("clean <dataset_name>")),
            ("filter", [name, query, output]) => Ok(Self::Filter {
                name: name.clone(),
                query: query.clone(),
                output: output.clone(),
            }),
            ("filter", _) => Err(usage("filter <dataset_name> \"<expr>\" <output_path>")),
            ("schema", [name]) => Ok(Self::Schema { name: name.clone() }),
            ("schema", _) => Err(usage("schema <dataset_name>")),
            ("datasets", []) => Ok(Self::Datasets),
            ("tools", []) => Ok(Self::Tools),
            ("help", []) => Ok(Self::Help),
            ("exit" | "quit", []) => Ok(Self::Exit),
            (other, _) => Err(format!(
                "Unknown command '{other}'. Type 'help' for the command list."
            )),
        }
    }

    /// Convert a data command into a tool call. Returns `None` for the
    /// console-local commands (help, tools, datasets, exit).
    pub fn to_tool_call(&self, call_id: &str) -> Option<ToolCall> {
        let (tool, args) = match self {
            Self::Load { path, name } => (
                "load_csv",
                json!({"file_path": path, "dataset_name": name}),
            ),
            Self::Describe { name } => ("describe_data", json!({"dataset_name": name})),
            Self::Clean { name } => ("clean_column_names", json!({"dataset_name": name})),
            Self::Filter { name, query, output } => (
                "filter_and_save",
                json!({"dataset_name": name, "query": query, "output_path": output}),
            ),
            Self::Schema { name } => ("generate_sql_schema", json!({"dataset_name": name})),
            Self::Datasets | Self::Tools | Self::Help | Self::Exit => return None,
        };

        let arguments: HashMap<String, serde_json::Value> = match args {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        Some(ToolCall::new(
            call_id.to_string(),
            tool.to_string(),
            arguments,
        ))
    }
}

/// Interactive console over a tool executor and the shared dataset store.
pub struct Console {
    executor: ToolExecutor,
    store: Arc<DatasetStore>,
    next_call: u64,
}

impl Console {
    pub fn new(executor: ToolExecutor, store: Arc<DatasetStore>) -> Self {
        Self {
            executor,
            store,
            next_call: 0,
        }
    }

    /// Run the prompt loop until `exit` or end of input.
    pub async fn run(&mut self) -> DatasmithResult<()> {
        print_banner();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout
                .write_all(format!("{} ", "datasmith>".green().bold()).as_bytes())
                .await
                .map_err(DatasmithError::from)?;
            stdout.flush().await.map_err(DatasmithError::from)?;

            let Some(line) = lines.next_line().await.map_err(DatasmithError::from)? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let tokens = match shell_words::split(line) {
                Ok(tokens) => tokens,
                Err(e) => {
                    println!("{} {e}", "Error:".red());
                    continue;
                }
            };

            let command = match ReplCommand::parse(&tokens) {
                Ok(command) => command,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            };

            match command {
                ReplCommand::Exit => {
                    println!("Goodbye!");
                    break;
                }
                ReplCommand::Help => print_banner(),
                ReplCommand::Tools => print_tools(&self.executor),
                ReplCommand::Datasets => {
                    let names = self.store.names();
                    if names.is_empty() {
                        println!("No datasets loaded.");
                    } else {
                        println!("Loaded datasets: [{}]", names.join(", "));
                    }
                }
                data_command => {
                    self.next_call += 1;
                    let call_id = format!("call-{}", self.next_call);
                    // to_tool_call only returns None for console-local
                    // commands, all handled above
                    let Some(call) = data_command.to_tool_call(&call_id) else {
                        continue;
                    };

                    if let Err(e) = self.executor.validate_calls(std::slice::from_ref(&call)) {
                        println!("{} {e}", "Error:".red());
                        continue;
                    }

                    let result = self.executor.execute_tool(&call).await;
                    if result.success {
                        println!("{}", result.output.unwrap_or_default());
                    } else {
                        println!("{} {}", "Error:".red(), result.error.unwrap_or_default());
                    }
                }
            }
        }

        Ok(())
    }
}

fn print_banner() {
    println!("{}", "=== datasmith: data analyst & ETL toolbox ===".bold());
    println!("Commands:");
    println!("  load <file_path> <dataset_name>              load a CSV into memory");
    println!("  describe <dataset_name>                      columns, types, nulls, stats");
    println!("  clean <dataset_name>                         normalize column names");
    println!("  filter <dataset_name> \"<expr>\" <output_path> save a filtered subset");
    println!("  schema <dataset_name>                        emit a CREATE TABLE statement");
    println!("  datasets | tools | help | exit");
    println!();
    println!("Example: filter sales_data \"Total > 1000\" data/high_value_sales.csv");
}

fn print_tools(executor: &ToolExecutor) {
    for schema in executor.tool_schemas() {
        println!("{}", schema.name.bold());
        println!("  {}", schema.description);
        if let Some(properties) = schema.parameters["properties"].as_object() {
            for (param, details) in properties {
                let description = details["description"].as_str().unwrap_or_default();
                println!("    {param}: {description}");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_data_commands() {
        assert_eq!(
            ReplCommand::parse(&tokens(&["load", "data/sales.csv", "sales"])),
            Ok(ReplCommand::Load {
                path: "data/sales.csv".into(),
                name: "sales".into(),
            })
        );
        assert_eq!(
            ReplCommand::parse(&tokens(&["filter", "sales", "Total > 1000", "out.csv"])),
            Ok(ReplCommand::Filter {
                name: "sales".into(),
                query: "Total > 1000".into(),
                output: "out.csv".into(),
            })
        );
        assert_eq!(
            ReplCommand::parse(&tokens(&["quit"])),
            Ok(ReplCommand::Exit)
        );
    }

    #[test]
    fn wrong_arity_reports_usage() {
        let err = ReplCommand::parse(&tokens(&["load", "only-path"])).unwrap_err();
        assert!(err.contains("Usage: load"));
        let err = ReplCommand::parse(&tokens(&["summon"])).unwrap_err();
        assert!(err.contains("summon"));
    }

    #[test]
    fn data_commands_convert_to_tool_calls() {
        let command = ReplCommand::parse(&tokens(&["describe", "sales"])).unwrap();
        let call = command.to_tool_call("call-1").unwrap();
        assert_eq!(call.name, "describe_data");
        assert_eq!(call.get_string("dataset_name").as_deref(), Some("sales"));

        assert!(ReplCommand::Help.to_tool_call("call-2").is_none());
    }
}
