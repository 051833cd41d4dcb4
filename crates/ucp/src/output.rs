use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;
use ucp_message::Message;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    #[serde(flatten)]
    message: &'a Message,
    checksum: &'a str,
}

/// Header fields, then the non-empty body fields by name.
fn message_rows(message: &Message) -> Vec<(String, String)> {
    let mut rows = vec![
        ("trn".to_string(), format!("{:02}", message.header.trn)),
        ("len".to_string(), format!("{:05}", message.header.len)),
        ("role".to_string(), message.header.role.to_string()),
        ("ot".to_string(), message.header.operation_type.clone()),
    ];
    if let Ok(Value::Object(body)) = serde_json::to_value(&message.body) {
        for (name, value) in body {
            match value {
                Value::String(text) if text.is_empty() => {}
                Value::String(text) => rows.push((name, text)),
                other => rows.push((name, other.to_string())),
            }
        }
    }
    rows
}

pub fn print_message(message: &Message, checksum: &str, wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = MessageOutput { message, checksum };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in message_rows(message) {
                table.add_row(vec![name.to_uppercase(), value]);
            }
            table.add_row(vec!["CHECKSUM".to_string(), checksum.to_string()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = message_rows(message)
                .into_iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            println!("{} checksum={checksum}", line.join(" "));
        }
        OutputFormat::Raw => {
            print_raw(wire);
        }
    }
}

/// Print a single named value, e.g. a checksum or an encoded address.
pub fn print_values(values: &[(&str, &str)], raw: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let object: serde_json::Map<String, Value> = values
                .iter()
                .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
                .collect();
            println!("{}", Value::Object(object));
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in values {
                table.add_row(vec![name.to_uppercase(), value.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = values
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            println!("{}", line.join(" "));
        }
        OutputFormat::Raw => print_raw(raw),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
