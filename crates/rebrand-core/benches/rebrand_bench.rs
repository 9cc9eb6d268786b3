use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rebrand_core::ast::{Expression, Node, Stylesheet};
use rebrand_core::codegen::to_less;
use rebrand_core::{rebrand, VariableRegistry};
use rebrand_test_helpers::fixtures::one_class_per_variable;
use rebrand_test_helpers::*;

/// `rules` rules, each with plain declarations, a declaration touching
/// `classes` registered variables and one nested rule.
fn stylesheet(rules: usize, classes: usize) -> Stylesheet {
    let touching = space((0..classes).map(|i| var(&format!("@v{i}"))).collect());
    sheet(
        (0..rules)
            .map(|i| {
                rule(
                    &format!(".component-{i}"),
                    vec![
                        decl("display", kw("block")),
                        decl("padding", space(vec![px(4.0), px(8.0)])),
                        decl("border", touching.clone()),
                        rule(
                            "&:hover",
                            vec![decl("border", Expression::negative(var("@v0")))],
                        ),
                    ],
                )
            })
            .collect::<Vec<Node>>(),
    )
}

fn run(sheet: &Stylesheet, registry: &VariableRegistry) -> Stylesheet {
    let mut sheet = sheet.clone();
    if rebrand(&mut sheet, registry).is_ok() {
        black_box(&sheet);
    }
    sheet
}

fn bench_rebrand_rule_count(c: &mut Criterion) {
    let registry = one_class_per_variable(2);
    let mut group = c.benchmark_group("rebrand_rules");
    for rules in [10, 100, 1000] {
        let source = stylesheet(rules, 2);
        group.bench_with_input(BenchmarkId::from_parameter(rules), &source, |b, source| {
            b.iter(|| run(black_box(source), &registry))
        });
    }
    group.finish();
}

fn bench_rebrand_class_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebrand_classes");
    for classes in [1, 2, 4, 8] {
        let registry = one_class_per_variable(classes);
        let source = stylesheet(100, classes);
        group.bench_with_input(BenchmarkId::from_parameter(classes), &source, |b, source| {
            b.iter(|| run(black_box(source), &registry))
        });
    }
    group.finish();
}

fn bench_emit_less(c: &mut Criterion) {
    let registry = one_class_per_variable(3);
    let output = run(&stylesheet(200, 3), &registry);

    c.bench_function("emit_less", |b| b.iter(|| black_box(to_less(black_box(&output)))));
}

criterion_group!(
    benches,
    bench_rebrand_rule_count,
    bench_rebrand_class_count,
    bench_emit_less
);
criterion_main!(benches);
