use indoc::indoc;
use rebrand_core::ast::{Declaration, Node, Stylesheet};
use rebrand_core::codegen::to_less;
use rebrand_core::{rebrand, RebrandStats, TransformError};
use rebrand_test_helpers::fixtures::one_class_per_variable;
use rebrand_test_helpers::*;

fn top_rule(sheet: &Stylesheet, index: usize) -> &rebrand_core::Rule {
    sheet.children[index].as_rule().expect("expected a rule")
}

#[test]
fn test_no_registered_variables_is_noop() {
    let registry = reference_registry();
    let source = sheet(vec![rule(
        ".plain",
        vec![
            decl("width", px(10.0)),
            decl("color", var("@unrelated")),
            decl("border", space(vec![px(1.0), kw("solid"), var("@gray")])),
        ],
    )]);

    let (output, stats) = rebrand_tree(source.clone(), &registry);

    assert_eq!(output, source);
    assert_eq!(stats.rules_synthesized, 0);
    assert_eq!(stats.rules_visited, 1);
}

#[test]
fn test_single_class_declaration() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(".bordered", vec![decl("width", var("@width"))])]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            .bordered {
              width: @width;
              .rebranding-sizes & {
                width: @width-s3;
              }
            }
        "}
    );
}

#[test]
fn test_inapplicable_property_is_ignored() {
    let registry = reference_registry();
    let source = sheet(vec![rule(".box", vec![decl("content", var("@width"))])]);

    let (output, stats) = rebrand_tree(source.clone(), &registry);

    assert_eq!(output, source);
    assert_eq!(stats, RebrandStats { rules_visited: 1, ..Default::default() });
}

#[test]
fn test_property_names_are_case_sensitive() {
    let registry = reference_registry();
    let source = sheet(vec![rule(".box", vec![decl("Width", var("@width"))])]);

    let (output, _) = rebrand_tree(source.clone(), &registry);

    assert_eq!(output, source);
}

#[test]
fn test_two_classes_produce_three_rules_in_order() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(
            ".card",
            vec![decl("border", space(vec![var("@width"), var("@orange")]))],
        )]),
        &registry,
    );

    insta::assert_snapshot!(output, @r"
    .card {
      border: @width @orange;
      .rebranding-sizes & {
        border: @width-s3 @orange;
      }
      .rebranding-colors & {
        border: @width @orange-s3;
      }
      .rebranding-sizes.rebranding-colors & {
        border: @width-s3 @orange-s3;
      }
    }
    ");
}

#[test]
fn test_original_declarations_untouched() {
    let registry = reference_registry();
    let (output, _) = rebrand_tree(
        sheet(vec![rule(
            ".card",
            vec![decl("border", space(vec![var("@width"), var("@orange")]))],
        )]),
        &registry,
    );

    let card = top_rule(&output, 0);
    assert_eq!(
        card.children[0],
        decl("border", space(vec![var("@width"), var("@orange")]))
    );
    assert_eq!(card.nested_rules().count(), 3);
}

#[test]
fn test_declarations_grouped_by_label() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(
            ".card",
            vec![
                decl("width", var("@width")),
                decl("color", var("@orange")),
                decl("border", space(vec![var("@width"), var("@orange")])),
            ],
        )]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            .card {
              width: @width;
              color: @orange;
              border: @width @orange;
              .rebranding-sizes & {
                width: @width-s3;
                border: @width-s3 @orange;
              }
              .rebranding-colors & {
                color: @orange-s3;
                border: @width @orange-s3;
              }
              .rebranding-sizes.rebranding-colors & {
                border: @width-s3 @orange-s3;
              }
            }
        "}
    );
}

#[test]
fn test_label_identity_ignores_class_order() {
    let registry = reference_registry();
    let (output, stats) = rebrand_tree(
        sheet(vec![rule(
            ".card",
            vec![
                decl("border", space(vec![var("@width"), var("@orange")])),
                decl("border", space(vec![var("@orange"), var("@width")])),
            ],
        )]),
        &registry,
    );

    assert_eq!(stats.rules_synthesized, 3);
    let card = top_rule(&output, 0);
    let combined = card.nested_rules().nth(2).expect("combined rule");
    assert_eq!(
        to_less(&Stylesheet::new(vec![Node::Rule(combined.clone())])),
        indoc! {"
            .rebranding-sizes.rebranding-colors & {
              border: @width-s3 @orange-s3;
              border: @orange-s3 @width-s3;
            }
        "}
    );
}

#[test]
fn test_same_class_variables_renamed_together() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(
            ".spaced",
            vec![decl("margin", space(vec![var("@width"), var("@width2")]))],
        )]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            .spaced {
              margin: @width @width2;
              .rebranding-sizes & {
                margin: @width-s3 @width2-s3;
              }
            }
        "}
    );
}

#[test]
fn test_nested_values_are_rewritten() {
    let registry = reference_registry();
    let value = comma(vec![
        space(vec![
            px(1.0),
            kw("solid"),
            rebrand_core::ast::Expression::call("fade", vec![var("@orange"), kw("50%")]),
        ]),
        rebrand_core::ast::Expression::negative(var("@width")),
    ]);
    let output = rebrand_to_less(sheet(vec![rule(".x", vec![decl("border", value)])]), &registry);

    assert!(output.contains(".rebranding-colors & {\n    border: 1px solid fade(@orange-s3, 50%), -@width;\n  }"));
    assert!(output.contains(".rebranding-sizes & {\n    border: 1px solid fade(@orange, 50%), -@width-s3;\n  }"));
}

#[test]
fn test_important_declarations_keep_flag() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![Node::Rule(rebrand_core::Rule::new(
            vec![simple_selector(".loud")],
            vec![Node::Declaration(
                Declaration::new("color", var("@orange")).important(),
            )],
        ))]),
        &registry,
    );

    assert!(output.contains(".rebranding-colors & {\n    color: @orange-s3 !important;\n  }"));
}

#[test]
fn test_mixin_definitions_are_excluded() {
    let registry = reference_registry();
    let source = sheet(vec![
        mixin_def(
            ".frame",
            &["@w"],
            vec![
                decl("width", var("@width")),
                rule(".inner", vec![decl("color", var("@orange"))]),
            ],
        ),
        rule(
            ".host",
            vec![mixin_def(".local", &[], vec![decl("width", var("@width"))])],
        ),
    ]);

    let (output, stats) = rebrand_tree(source.clone(), &registry);

    assert_eq!(output, source);
    assert_eq!(stats.rules_synthesized, 0);
}

#[test]
fn test_rules_after_mixin_definition_still_rewritten() {
    let registry = reference_registry();
    let (output, _) = rebrand_tree(
        sheet(vec![
            mixin_def(".frame", &[], vec![decl("width", var("@width"))]),
            rule(".after", vec![decl("width", var("@width"))]),
        ]),
        &registry,
    );

    assert_eq!(top_rule(&output, 1).nested_rules().count(), 1);
}

#[test]
fn test_second_run_adds_nothing_for_renamed_declarations() {
    let registry = reference_registry();
    let (first, _) = rebrand_tree(
        sheet(vec![rule(".bordered", vec![decl("width", var("@width"))])]),
        &registry,
    );
    let (second, _) = rebrand_tree(first.clone(), &registry);

    let bordered = top_rule(&second, 0);
    for synthesized in bordered.nested_rules() {
        assert_eq!(synthesized.nested_rules().count(), 0);
        assert!(synthesized
            .declarations()
            .all(|decl| decl.value == var("@width-s3")));
    }
    assert_eq!(bordered.nested_rules().count(), 2);
}

#[test]
fn test_nested_rules_get_their_own_children() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(
            ".outer",
            vec![
                decl("width", var("@width")),
                rule(".inner", vec![decl("color", var("@orange"))]),
                decl("margin", var("@width2")),
            ],
        )]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            .outer {
              width: @width;
              .rebranding-sizes & {
                width: @width-s3;
                margin: @width2-s3;
              }
              .inner {
                color: @orange;
                .rebranding-colors & {
                  color: @orange-s3;
                }
              }
              margin: @width2;
            }
        "}
    );
}

#[test]
fn test_no_leakage_between_siblings() {
    let registry = reference_registry();
    let (output, _) = rebrand_tree(
        sheet(vec![
            rule(".first", vec![decl("width", var("@width"))]),
            rule(".second", vec![decl("height", px(4.0))]),
            rule(".third", vec![decl("color", var("@orange"))]),
        ]),
        &registry,
    );

    assert_eq!(top_rule(&output, 1).children, vec![decl("height", px(4.0))]);
    let third = top_rule(&output, 2);
    assert_eq!(third.nested_rules().count(), 1);
    assert_eq!(
        third.nested_rules().next().unwrap().declarations().count(),
        1
    );
}

#[test]
fn test_three_classes_cover_power_set() {
    let registry = one_class_per_variable(3);
    let (output, stats) = rebrand_tree(
        sheet(vec![rule(
            ".tri",
            vec![decl("border", space(vec![var("@v0"), var("@v1"), var("@v2")]))],
        )]),
        &registry,
    );

    assert_eq!(stats.rules_synthesized, 7);
    let less = to_less(&output);
    assert!(less.contains(".brand-0.brand-2 & {\n    border: @v0-s3 @v1 @v2-s3;\n  }"));
    assert!(less.contains(".brand-0.brand-1.brand-2 & {\n    border: @v0-s3 @v1-s3 @v2-s3;\n  }"));
}

#[test]
fn test_four_classes_skip_intermediate_subsets() {
    let registry = one_class_per_variable(4);
    let (output, stats) = rebrand_tree(
        sheet(vec![rule(
            ".quad",
            vec![decl(
                "border",
                space(vec![var("@v0"), var("@v1"), var("@v2"), var("@v3")]),
            )],
        )]),
        &registry,
    );

    assert_eq!(stats.rules_synthesized, 4 + 6 + 1);
    let less = to_less(&output);
    assert!(less.contains(".brand-0.brand-1.brand-2.brand-3 & {"));
    assert!(!less.contains(".brand-0.brand-1.brand-2 & {"));
}

#[test]
fn test_mixin_call_statements() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(
            ".panel",
            vec![
                mixin_call(".border", vec![var("@width"), var("@orange")]),
                mixin_call(".rounded", vec![var("@width")]),
            ],
        )]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            .panel {
              .border(@width, @orange);
              .rounded(@width);
              .rebranding-sizes & {
                .border(@width-s3, @orange);
              }
              .rebranding-colors & {
                .border(@width, @orange-s3);
              }
              .rebranding-sizes.rebranding-colors & {
                .border(@width-s3, @orange-s3);
              }
            }
        "}
    );
}

#[test]
fn test_mixin_call_ignores_preceding_declaration_property() {
    let registry = reference_registry();
    let (output, _) = rebrand_tree(
        sheet(vec![rule(
            ".panel",
            vec![
                decl("width", var("@width")),
                mixin_call(".rounded", vec![var("@width")]),
            ],
        )]),
        &registry,
    );

    let panel = top_rule(&output, 0);
    let synthesized = panel.nested_rules().next().expect("synthesized rule");
    assert_eq!(synthesized.children, vec![decl("width", var("@width-s3"))]);
}

#[test]
fn test_at_rules_at_root_are_transparent() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![at_rule(
            "media",
            "print",
            vec![
                decl("color", var("@orange")),
                rule(".a", vec![decl("color", var("@orange"))]),
            ],
        )]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            @media print {
              color: @orange;
              .a {
                color: @orange;
                .rebranding-colors & {
                  color: @orange-s3;
                }
              }
            }
        "}
    );
}

#[test]
fn test_at_rule_inside_rule_gets_own_synthesized_rules() {
    let registry = reference_registry();
    let (output, stats) = rebrand_tree(
        sheet(vec![rule(
            ".b",
            vec![
                decl("width", var("@width")),
                at_rule(
                    "media",
                    "(min-width: 768px)",
                    vec![
                        decl("width", var("@width")),
                        rule(".c", vec![decl("color", var("@orange"))]),
                    ],
                ),
            ],
        )]),
        &registry,
    );

    assert_eq!(stats.rules_synthesized, 3);
    assert_eq!(
        to_less(&output),
        indoc! {"
            .b {
              width: @width;
              @media (min-width: 768px) {
                width: @width;
                .rebranding-sizes & {
                  width: @width-s3;
                }
                .c {
                  color: @orange;
                  .rebranding-colors & {
                    color: @orange-s3;
                  }
                }
              }
              .rebranding-sizes & {
                width: @width-s3;
              }
            }
        "}
    );
}

#[test]
fn test_nested_at_rules_inside_rule() {
    let registry = reference_registry();
    let output = rebrand_to_less(
        sheet(vec![rule(
            ".b",
            vec![at_rule(
                "media",
                "screen",
                vec![at_rule("supports", "(display: grid)", vec![decl("color", var("@orange"))])],
            )],
        )]),
        &registry,
    );

    assert_eq!(
        output,
        indoc! {"
            .b {
              @media screen {
                @supports (display: grid) {
                  color: @orange;
                  .rebranding-colors & {
                    color: @orange-s3;
                  }
                }
              }
            }
        "}
    );
}

#[test]
fn test_root_declarations_are_not_rewritten() {
    let registry = reference_registry();
    let source = sheet(vec![decl("@alias", var("@width")), decl("width", var("@width"))]);

    let (output, _) = rebrand_tree(source.clone(), &registry);

    assert_eq!(output, source);
}

#[test]
fn test_invalid_tree_is_rejected() {
    let registry = reference_registry();
    let mut invalid = sheet(vec![rule(".x", vec![decl("", var("@width"))])]);

    let result = rebrand(&mut invalid, &registry);

    assert!(matches!(result, Err(TransformError::InvalidTree(_))));
}

#[test]
fn test_tree_round_trips_through_json_after_rebrand() {
    let registry = reference_registry();
    let (output, _) = rebrand_tree(
        sheet(vec![rule(".card", vec![decl("width", var("@width"))])]),
        &registry,
    );

    let json = serde_json::to_string(&output).unwrap();
    let back: Stylesheet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, output);
}
