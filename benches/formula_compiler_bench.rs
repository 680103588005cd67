use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use filter_formula::condition::{FilterCondition, LogicalOperator, Operator};
use filter_formula::field::{Field, FieldType};
use filter_formula::formula_compiler;
use std::hint::black_box;

fn text_condition(name: &str, value: &str, joined: Option<LogicalOperator>) -> FilterCondition {
    FilterCondition {
        field: Field::new(name, FieldType::SingleLineText),
        operation: Operator::Is,
        value: Some(value.into()),
        logical_operator: joined,
    }
}

fn link_condition(name: &str, token: &str, joined: Option<LogicalOperator>) -> FilterCondition {
    FilterCondition {
        field: Field::new(name, FieldType::MultipleRecordLinks),
        operation: Operator::Contains,
        value: Some(token.into()),
        logical_operator: joined,
    }
}

fn condition_lists() -> Vec<(&'static str, Vec<FilterCondition>)> {
    vec![
        ("simple", vec![text_condition("Status", "Open", None)]),
        (
            "medium",
            vec![
                text_condition("Status", "Open", None),
                link_condition("Class", "recXYZ", Some(LogicalOperator::And)),
                text_condition("Stage", "Review", Some(LogicalOperator::And)),
            ],
        ),
        (
            "complex",
            vec![
                text_condition("Status", "Open", None),
                text_condition("Stage", "Review", Some(LogicalOperator::And)),
                link_condition("Class", "recAAA", Some(LogicalOperator::Or)),
                link_condition("Class", "recBBB", Some(LogicalOperator::And)),
                text_condition("Status", "Archived", Some(LogicalOperator::Or)),
                text_condition("Owner", "O'Brien", Some(LogicalOperator::And)),
            ],
        ),
    ]
}

fn benchmark_render_condition(c: &mut Criterion) {
    let cases = vec![
        ("text", text_condition("Status", "Open", None)),
        ("link", link_condition("Class", "recXYZ", None)),
    ];

    let mut group = c.benchmark_group("render_condition");

    for (name, condition) in cases {
        group.bench_with_input(BenchmarkId::new("render", name), &condition, |b, condition| {
            b.iter(|| {
                let fragment = formula_compiler::render_condition(black_box(condition))
                    .expect("render should succeed");
                black_box(fragment)
            })
        });
    }

    group.finish();
}

fn benchmark_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for (name, conditions) in condition_lists() {
        group.bench_with_input(BenchmarkId::new("compile", name), &conditions, |b, conditions| {
            b.iter(|| {
                let result =
                    formula_compiler::compile(black_box(conditions)).expect("compile should succeed");
                black_box(result)
            })
        });
    }

    group.finish();
}

fn benchmark_end_to_end(c: &mut Criterion) {
    let payloads: Vec<(&str, String)> = condition_lists()
        .into_iter()
        .map(|(name, conditions)| {
            (name, serde_json::to_string(&conditions).expect("serialize"))
        })
        .collect();

    let mut group = c.benchmark_group("end_to_end");

    for (name, payload) in payloads {
        group.bench_with_input(BenchmarkId::new("parse_and_compile", name), &payload, |b, payload| {
            b.iter(|| {
                let conditions: Vec<FilterCondition> =
                    serde_json::from_str(black_box(payload)).expect("parse should succeed");
                let result =
                    formula_compiler::compile(&conditions).expect("compile should succeed");
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_render_condition,
    benchmark_compile,
    benchmark_end_to_end
);
criterion_main!(benches);
