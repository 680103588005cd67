use anyhow::Context;
use filter_formula::condition::{FilterCondition, LogicalOperator, Operator};
use filter_formula::config::FieldCatalog;
use filter_formula::field::{Field, FieldType};
use filter_formula::formula_compiler;
use filter_formula::operations;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const SCHEMA_FILE: &str = "table_schema.json";

/// Load the field catalog from the schema file, falling back to the built-in
/// sample schema.
fn load_catalog() -> FieldCatalog {
    match FieldCatalog::from_json_file(SCHEMA_FILE) {
        Ok(catalog) => {
            println!("loaded {} fields from {}", catalog.fields.len(), SCHEMA_FILE);
            catalog
        }
        Err(e) => {
            println!("could not load {SCHEMA_FILE} ({e}), using the sample schema");
            FieldCatalog::sample()
        }
    }
}

fn print_schema(catalog: &FieldCatalog) {
    for field in catalog.filterable_fields() {
        let labels: Vec<String> = operations::valid_operations(field.field_type)
            .iter()
            .map(|op| format!("{} ({})", op.key(), op.label()))
            .collect();
        println!("  {} [{}]: {}", field.name, field.field_type, labels.join(", "));
    }
}

fn compile_and_print(conditions: &[FilterCondition]) {
    match formula_compiler::compile(conditions) {
        Ok(result) => {
            if result.formula.is_empty() {
                println!("(no filter -- omit the query parameter)");
            } else {
                println!("filterByFormula={}", result.formula);
                if let Ok(decoded) = urlencoding::decode(&result.formula) {
                    println!("decoded: {decoded}");
                }
            }
            for dropped in &result.dropped {
                println!(
                    "dropped condition {} on {:?} ({})",
                    dropped.index, dropped.field_name, dropped.operation
                );
            }
        }
        Err(e) => println!("compile error: {e}"),
    }
}

fn run_demo(catalog: &FieldCatalog) {
    println!("--- filter_formula: condition list to formula compiler ---");

    println!("\n[step 1]: filterable fields in the schema");
    print_schema(catalog);

    println!("\n[step 2]: compile a worked condition list");
    let conditions = vec![
        FilterCondition {
            field: Field::new("Status", FieldType::SingleLineText),
            operation: Operator::Is,
            value: Some("Active".into()),
            logical_operator: None,
        },
        FilterCondition {
            field: Field::new("Class", FieldType::MultipleRecordLinks),
            operation: Operator::Contains,
            value: Some("recx4gIvxC2rLcDrL".into()),
            logical_operator: Some(LogicalOperator::And),
        },
        FilterCondition {
            field: Field::new("Priority", FieldType::Number),
            operation: Operator::Is,
            value: Some(3.into()),
            logical_operator: Some(LogicalOperator::Or),
        },
    ];
    for condition in &conditions {
        println!(
            "  {} {} {}",
            condition.field.name,
            operations::format_operator(condition.operation.key()),
            condition.value.as_ref().map(|v| v.to_string()).unwrap_or_default()
        );
    }
    compile_and_print(&conditions);
}

fn print_help() {
    println!("enter a JSON array of conditions, e.g.:");
    println!(
        r#"  [{{"field":{{"name":"Status","type":"singleLineText"}},"operation":"is","value":"Active"}}]"#
    );
    println!("commands: schema, help, quit");
}

fn run_repl(catalog: &FieldCatalog) -> anyhow::Result<()> {
    println!("\n[step 3]: interactive mode");
    println!("paste a JSON condition list, or type 'schema', 'help', 'quit'");

    let mut editor = DefaultEditor::new().context("failed to start the line editor")?;
    loop {
        match editor.readline("filter> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                match line {
                    "quit" | "exit" => break,
                    "schema" => print_schema(catalog),
                    "help" => print_help(),
                    _ => match serde_json::from_str::<Vec<FilterCondition>>(line) {
                        Ok(conditions) => compile_and_print(&conditions),
                        Err(e) => println!("not a condition list: {e}"),
                    },
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("line editor failure"),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let catalog = load_catalog();
    run_demo(&catalog);
    run_repl(&catalog)
}
