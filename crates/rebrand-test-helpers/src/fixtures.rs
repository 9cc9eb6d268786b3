use rebrand_core::{RegistryConfig, VariableRegistry};

/// Registry used throughout the test suites: four size variables sharing one
/// marker class and a single color variable.
pub const REFERENCE_REGISTRY_YAML: &str = r#"
postfix: "-s3"
variables:
  "@width":
    className: rebranding-sizes
    props: [width, margin, border]
  "@width2":
    className: rebranding-sizes
    props: [width, margin]
  "@width3":
    className: rebranding-sizes
    props: [width, margin]
  "@width4":
    className: rebranding-sizes
    props: [width, margin]
  "@orange":
    className: rebranding-colors
    props: [color, background, background-color, border]
"#;

pub fn reference_registry() -> VariableRegistry {
    RegistryConfig::from_yaml_str(REFERENCE_REGISTRY_YAML)
        .and_then(VariableRegistry::from_config)
        .expect("reference registry should be valid")
}

/// Registry with `count` variables `@v0..` each bound to its own class
/// `brand-0..`, applicable to `border`.
pub fn one_class_per_variable(count: usize) -> VariableRegistry {
    let mut yaml = String::from("variables:\n");
    for i in 0..count {
        yaml.push_str(&format!(
            "  \"@v{i}\":\n    className: brand-{i}\n    props: [border]\n"
        ));
    }
    RegistryConfig::from_yaml_str(&yaml)
        .and_then(RegistryConfig::into_registry)
        .expect("generated registry should be valid")
}
