//! Migration configuration from YAML
//!
//! Every field has a default that reproduces the stock migration, so a
//! config file only needs to name what it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level migration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Package manager executable (`remove` / `add` subcommands)
    pub package_manager: String,

    /// The Flow to TypeScript converter
    pub converter: ConverterConfig,

    /// Dependency swaps performed after conversion
    pub dependencies: DependencyConfig,

    /// Values written into package.json
    pub manifest: ManifestConfig,

    /// Shared declaration files, relative to the target directory
    pub declarations: DeclarationConfig,
}

/// Converter invocation and prompt answering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Converter executable
    pub program: String,

    /// Arguments passed after the target path
    pub args: Vec<String>,

    /// Caret-style version requirement the converter must satisfy
    pub min_version: String,

    /// Shown to the user when the version requirement is not met
    pub upgrade_command: String,

    /// Kill the converter after this many seconds (unbounded when absent)
    pub timeout_secs: Option<u64>,

    /// Prompt table, first matching rule wins
    pub prompts: Vec<PromptRuleConfig>,
}

/// One row of the prompt table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRuleConfig {
    /// Phrase (or regex) to look for in the converter's output
    pub pattern: String,

    /// Answer written to the converter's stdin
    pub answer: PromptAnswer,

    /// Whether to use regex pattern matching
    #[serde(default)]
    pub use_regex: bool,
}

/// Answer to an interactive prompt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptAnswer {
    Yes,
    No,
}

impl PromptAnswer {
    /// The line written to the process input
    pub fn line(self) -> &'static str {
        match self {
            PromptAnswer::Yes => "y\n",
            PromptAnswer::No => "n\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    pub remove: String,
    pub add: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Expected `types` entry
    pub types_entry: String,
    /// `main` entry
    pub main_entry: String,
    /// `module` entry
    pub module_entry: String,
    /// Key of the source entry
    pub source_key: String,
    /// Value of the source entry
    pub source_entry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationConfig {
    /// Flow declaration index (block format)
    pub flow_index: String,
    /// TypeScript ignore list (one package name per line)
    pub typescript_ignore_list: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            package_manager: "bolt".to_string(),
            converter: ConverterConfig::default(),
            dependencies: DependencyConfig::default(),
            manifest: ManifestConfig::default(),
            declarations: DeclarationConfig::default(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "flowtees".to_string(),
            args: vec!["--react-namespace".to_string(), "false".to_string()],
            min_version: "^0.1.8".to_string(),
            upgrade_command: "pip3 install flowtees --upgrade".to_string(),
            timeout_secs: None,
            prompts: default_prompts(),
        }
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            remove: "@babel/runtime".to_string(),
            add: "tslib".to_string(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            types_entry: "dist/cjs/index.d.ts".to_string(),
            main_entry: "dist/cjs/index.js".to_string(),
            module_entry: "dist/esm/index.js".to_string(),
            source_key: "atlaskit:src".to_string(),
            source_entry: "src/index.ts".to_string(),
        }
    }
}

impl Default for DeclarationConfig {
    fn default() -> Self {
        Self {
            flow_index: "../../../flow-typed/core-components.js".to_string(),
            typescript_ignore_list: "../../../typescript/ignored-packages.txt".to_string(),
        }
    }
}

/// The stock prompt table
///
/// "continue" is answered yes and "override" no; see DESIGN.md.
pub fn default_prompts() -> Vec<PromptRuleConfig> {
    let rule = |pattern: &str, answer| PromptRuleConfig {
        pattern: pattern.to_string(),
        answer,
        use_regex: false,
    };
    vec![
        rule("Do you want to configure build files", PromptAnswer::Yes),
        rule("Do you want to continue", PromptAnswer::Yes),
        rule("Do you want to override this", PromptAnswer::No),
    ]
}

impl MigrationConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: MigrationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective configuration
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.package_manager.trim().is_empty() {
            anyhow::bail!("package_manager must not be empty");
        }
        if self.converter.program.trim().is_empty() {
            anyhow::bail!("converter.program must not be empty");
        }
        if self.dependencies.remove.trim().is_empty() || self.dependencies.add.trim().is_empty() {
            anyhow::bail!("dependencies.remove and dependencies.add must not be empty");
        }

        semver::VersionReq::parse(&self.converter.min_version).with_context(|| {
            format!(
                "converter.min_version '{}' is not a valid version requirement",
                self.converter.min_version
            )
        })?;

        for rule in &self.converter.prompts {
            if rule.pattern.is_empty() {
                anyhow::bail!("Prompt patterns must not be empty");
            }
            if rule.use_regex {
                regex::Regex::new(&rule.pattern)
                    .with_context(|| format!("Invalid prompt regex '{}'", rule.pattern))?;
            }
        }

        if self.converter.timeout_secs == Some(0) {
            anyhow::bail!("converter.timeout_secs must be greater than zero");
        }

        if self.declarations.flow_index.trim().is_empty()
            || self.declarations.typescript_ignore_list.trim().is_empty()
        {
            anyhow::bail!("declaration file paths must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = MigrationConfig::from_yaml("{}").unwrap();
        assert_eq!(config, MigrationConfig::default());
        assert_eq!(config.package_manager, "bolt");
        assert_eq!(config.converter.program, "flowtees");
        assert_eq!(config.manifest.types_entry, "dist/cjs/index.d.ts");
    }

    #[test]
    fn test_default_prompt_table_order() {
        let prompts = default_prompts();
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0].answer, PromptAnswer::Yes);
        assert!(prompts[1].pattern.contains("continue"));
        assert_eq!(prompts[1].answer, PromptAnswer::Yes);
        assert!(prompts[2].pattern.contains("override"));
        assert_eq!(prompts[2].answer, PromptAnswer::No);
    }

    #[test]
    fn test_override_prompt_table() {
        let yaml = r#"
converter:
  prompts:
    - pattern: "Do you want to continue"
      answer: "no"
    - pattern: "over(ride|write) this"
      answer: "no"
      use_regex: true
"#;

        let config = MigrationConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.converter.prompts.len(), 2);
        assert_eq!(config.converter.prompts[0].answer, PromptAnswer::No);
        assert!(config.converter.prompts[1].use_regex);
        // Untouched fields keep their defaults
        assert_eq!(config.converter.program, "flowtees");
        assert_eq!(config.converter.min_version, "^0.1.8");
    }

    #[test]
    fn test_invalid_version_requirement_fails() {
        let yaml = r#"
converter:
  min_version: "not a version"
"#;
        assert!(MigrationConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_invalid_regex_fails() {
        let yaml = r#"
converter:
  prompts:
    - pattern: "(unclosed"
      answer: "yes"
      use_regex: true
"#;
        assert!(MigrationConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_empty_package_manager_fails() {
        assert!(MigrationConfig::from_yaml("package_manager: \"\"").is_err());
    }

    #[test]
    fn test_zero_timeout_fails() {
        let yaml = r#"
converter:
  timeout_secs: 0
"#;
        assert!(MigrationConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = MigrationConfig::default().to_yaml().unwrap();
        let parsed = MigrationConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, MigrationConfig::default());
    }

    #[test]
    fn test_from_file_reports_missing_file() {
        let err = MigrationConfig::from_file("/tmp/nonexistent_sink_config_12345.yaml").unwrap_err();
        assert!(err.to_string().contains("nonexistent_sink_config_12345.yaml"));
    }
}
