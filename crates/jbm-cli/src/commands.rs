use std::io::Read;

use anyhow::{bail, Context};
use colored::Colorize;
use jbm_cursor::{Cursor, Token};
use jbm_merge::{MergeConfig, Merger};
use jbm_types::{is_canonical, Document};
use serde_json::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
        Command::Tokens(args) => cmd_tokens(args, &cli.format),
    }
}

/// Read a JSON value from a file, or stdin for `-`.
fn read_value(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("{source} is not valid JSON"))
}

/// JSON `null` at the top level stands for an absent document.
fn read_document(source: &str) -> anyhow::Result<Option<Document>> {
    Ok(match read_value(source)? {
        Value::Null => None,
        value => Some(Document::from(value)),
    })
}

fn merge_config(args: &MergeArgs) -> anyhow::Result<MergeConfig> {
    let mut config = match &args.config {
        Some(path) => MergeConfig::load(path)?,
        None => MergeConfig::default(),
    };
    if args.no_merge_arrays {
        config.merge_arrays = false;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy.into();
    }
    Ok(config)
}

/// What `jbm merge` prints: the merged JSON for stdout and, with `--stats`,
/// the stats report for stderr.
struct MergeReport {
    output: String,
    stats: Option<String>,
}

fn render_merge(args: &MergeArgs, format: &OutputFormat) -> anyhow::Result<MergeReport> {
    if args.first == "-" && args.second == "-" {
        bail!("only one input can be read from stdin");
    }
    let config = merge_config(args)?;
    let first = read_document(&args.first)?;
    let second = read_document(&args.second)?;

    let (merged, stats) = Merger::new(config).merge_with_stats(first.as_ref(), second.as_ref());

    let output = match (&merged, args.pretty) {
        (Some(doc), true) => serde_json::to_string_pretty(doc)?,
        (Some(doc), false) => serde_json::to_string(doc)?,
        (None, _) => "null".to_owned(),
    };

    let stats = match (args.stats, format) {
        (false, _) => None,
        (true, OutputFormat::Json) => Some(serde_json::to_string(&stats)?),
        (true, OutputFormat::Text) => Some(
            [
                format!("{} merge stats", "✓".green().bold()),
                format!("  Objects merged: {}", stats.objects_merged.to_string().bold()),
                format!("  Arrays concatenated: {}", stats.arrays_concatenated.to_string().bold()),
                format!("  Overrides: {}", stats.overrides.to_string().bold()),
                format!("  Key comparisons: {}", stats.keys_compared),
                format!("  Lookups: {}", stats.lookups),
                format!("  Max depth: {}", stats.max_depth),
            ]
            .join("\n"),
        ),
    };
    Ok(MergeReport { output, stats })
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let report = render_merge(&args, format)?;
    println!("{}", report.output);
    if let Some(stats) = report.stats {
        eprintln!("{stats}");
    }
    Ok(())
}

/// JSON Pointers of every object whose keys, as written, are not in
/// canonical order.
fn unordered_objects(value: &Value, pointer: &mut String, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if !is_canonical(map.keys().map(String::as_str)) {
                out.push(if pointer.is_empty() { "/".to_owned() } else { pointer.clone() });
            }
            for (key, child) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));
                unordered_objects(child, pointer, out);
                pointer.truncate(len);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&idx.to_string());
                unordered_objects(child, pointer, out);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let value = read_value(&args.file)?;
    let mut unordered = Vec::new();
    unordered_objects(&value, &mut String::new(), &mut unordered);

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "unordered": unordered })),
        OutputFormat::Text => {
            if unordered.is_empty() {
                println!("{} {} is in canonical key order", "✓".green().bold(), args.file.bold());
            }
            for pointer in &unordered {
                println!("  {} {}", "unordered:".red(), pointer);
            }
        }
    }

    if !unordered.is_empty() {
        bail!("{} object(s) out of canonical key order", unordered.len());
    }
    Ok(())
}

fn cmd_tokens(args: TokensArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let doc = Document::from(read_value(&args.file)?);
    let Some(container) = doc.as_container() else {
        println!("{} {} is a {} scalar, nothing to walk", "!".yellow(), args.file.bold(), doc.kind());
        return Ok(());
    };

    let mut cursor = Cursor::open(container);
    let mut lines = Vec::new();
    let mut depth = 0usize;
    loop {
        let token = cursor.next_token(args.skip_nested);
        if token.is_done() {
            break;
        }
        if matches!(token, Token::EndObject | Token::EndArray) {
            depth = depth.saturating_sub(1);
        }
        lines.push((depth, token.to_string()));
        if matches!(token, Token::BeginObject | Token::BeginArray) {
            depth += 1;
        }
    }

    match format {
        OutputFormat::Json => {
            let tokens: Vec<&str> = lines.iter().map(|(_, t)| t.as_str()).collect();
            println!("{}", serde_json::to_string(&tokens)?);
        }
        OutputFormat::Text => {
            for (depth, token) in &lines {
                println!("{}{}", "  ".repeat(*depth), token);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn pointers(value: Value) -> Vec<String> {
        let mut out = Vec::new();
        unordered_objects(&value, &mut String::new(), &mut out);
        out
    }

    #[test]
    fn canonical_document_has_no_findings() {
        assert!(pointers(json!({"a": 1, "b": {"x": 1, "yy": 2}, "cc": [{"k": 1}]})).is_empty());
    }

    #[test]
    fn findings_point_at_unordered_objects() {
        let found = pointers(serde_json::from_str(r#"{"b": 1, "a": {"zz": 1, "y": 2}}"#).unwrap());
        assert_eq!(found, vec!["/".to_owned(), "/a".to_owned()]);
    }

    #[test]
    fn findings_inside_arrays_and_escaped_keys() {
        let found = pointers(serde_json::from_str(r#"{"a/b": [{"cc": 1, "d": 2}]}"#).unwrap());
        assert_eq!(found, vec!["/a~1b/0".to_owned()]);
    }

    #[test]
    fn null_file_is_absent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "null").unwrap();
        let doc = read_document(file.path().to_str().unwrap()).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn invalid_json_reports_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let path = file.path().to_str().unwrap().to_owned();
        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains(&path));
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "merge_arrays = true\nstrategy = \"lookup\"").unwrap();
        let args = MergeArgs {
            first: "a".into(),
            second: "b".into(),
            no_merge_arrays: true,
            strategy: Some(StrategyArg::Sorted),
            config: Some(file.path().to_path_buf()),
            pretty: false,
            stats: false,
        };
        let config = merge_config(&args).unwrap();
        assert!(!config.merge_arrays);
        assert_eq!(config.strategy, jbm_merge::JoinStrategy::SortedJoin);
    }

    fn json_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();
        file
    }

    fn merge_args(first: &tempfile::NamedTempFile, second: &tempfile::NamedTempFile) -> MergeArgs {
        MergeArgs {
            first: first.path().to_str().unwrap().to_owned(),
            second: second.path().to_str().unwrap().to_owned(),
            no_merge_arrays: false,
            strategy: None,
            config: None,
            pretty: false,
            stats: false,
        }
    }

    #[test]
    fn merge_of_two_null_inputs_prints_null() {
        let (a, b) = (json_file("null"), json_file("null"));
        let report = render_merge(&merge_args(&a, &b), &OutputFormat::Text).unwrap();
        assert_eq!(report.output, "null");
        assert!(report.stats.is_none());
    }

    #[test]
    fn merge_with_one_null_input_prints_the_other() {
        let (a, b) = (json_file("null"), json_file(r#"{"b": [1], "a": {"x": true}}"#));
        let report = render_merge(&merge_args(&a, &b), &OutputFormat::Text).unwrap();
        assert_eq!(report.output, r#"{"a":{"x":true},"b":[1]}"#);

        let report = render_merge(&merge_args(&b, &a), &OutputFormat::Text).unwrap();
        assert_eq!(report.output, r#"{"a":{"x":true},"b":[1]}"#);
    }

    #[test]
    fn merge_output_is_canonical() {
        let (a, b) = (json_file(r#"{"long": 1, "s": {"q": 1}}"#), json_file(r#"{"s": {"p": 2}, "mm": 3}"#));
        let report = render_merge(&merge_args(&a, &b), &OutputFormat::Text).unwrap();
        assert_eq!(report.output, r#"{"s":{"p":2,"q":1},"mm":3,"long":1}"#);
    }

    #[test]
    fn no_merge_arrays_flag_overrides_arrays() {
        let (a, b) = (json_file(r#"{"l": [1, 2]}"#), json_file(r#"{"l": [3]}"#));
        let mut args = merge_args(&a, &b);
        let report = render_merge(&args, &OutputFormat::Text).unwrap();
        assert_eq!(report.output, r#"{"l":[1,2,3]}"#);

        args.no_merge_arrays = true;
        let report = render_merge(&args, &OutputFormat::Text).unwrap();
        assert_eq!(report.output, r#"{"l":[3]}"#);
    }

    #[test]
    fn pretty_output_spans_lines() {
        let (a, b) = (json_file(r#"{"a": 1}"#), json_file(r#"{"b": 2}"#));
        let mut args = merge_args(&a, &b);
        args.pretty = true;
        let report = render_merge(&args, &OutputFormat::Text).unwrap();
        assert!(report.output.contains('\n'));
        let value: Value = serde_json::from_str(&report.output).unwrap();
        assert_eq!(value, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn json_stats_are_parseable() {
        let (a, b) = (json_file(r#"{"o": {"x": 1}, "l": [1]}"#), json_file(r#"{"o": {"x": 2}, "l": [2]}"#));
        let mut args = merge_args(&a, &b);
        args.stats = true;
        let report = render_merge(&args, &OutputFormat::Json).unwrap();
        let stats: Value = serde_json::from_str(&report.stats.unwrap()).unwrap();
        assert_eq!(stats["objects_merged"], json!(2));
        assert_eq!(stats["arrays_concatenated"], json!(1));
        assert_eq!(stats["overrides"], json!(1));
    }

    #[test]
    fn text_stats_list_counters() {
        let (a, b) = (json_file(r#"{"a": 1}"#), json_file(r#"{"a": 2}"#));
        let mut args = merge_args(&a, &b);
        args.stats = true;
        let stats = render_merge(&args, &OutputFormat::Text).unwrap().stats.unwrap();
        assert!(stats.contains("Objects merged"));
        assert!(stats.contains("Overrides"));
        assert!(stats.contains("Max depth"));
    }

    #[test]
    fn two_stdin_inputs_rejected() {
        let mut args = merge_args(&json_file("{}"), &json_file("{}"));
        args.first = "-".into();
        args.second = "-".into();
        let err = render_merge(&args, &OutputFormat::Text).err().unwrap();
        assert!(err.to_string().contains("stdin"));
    }
}
