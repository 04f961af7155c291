//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "mono-repos.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "mono-repos.yaml";

/// Config file names searched for, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    DEFAULT_CONFIG_TOML,
    DEFAULT_CONFIG_YAML,
    ".mono-repos.toml",
    ".mono-repos.yaml",
];

/// Default configuration template (TOML)
pub const DEFAULT_CONFIG_TEMPLATE_TOML: &str = r#"# mono-repos configuration

[git]
# Remote and branch that release commits and tags are pushed to
remote = "origin"
branch = "master"
# Refuse to publish when the local branch is behind the remote
verify = false

[npm]
program = "npm"
# registry = "https://registry.npmjs.org"
# access = "public"
# tag = "latest"

[defaults]
# Options every package starts from; command-line flags override them
silent = false
"#;

/// Default configuration template (YAML)
pub const DEFAULT_CONFIG_TEMPLATE_YAML: &str = r#"# mono-repos configuration

git:
  # Remote and branch that release commits and tags are pushed to
  remote: origin
  branch: master
  # Refuse to publish when the local branch is behind the remote
  verify: false

npm:
  program: npm
  # registry: https://registry.npmjs.org
  # access: public
  # tag: latest

defaults:
  # Options every package starts from; command-line flags override them
  silent: false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_templates_parse_to_defaults() {
        let from_toml: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE_TOML).unwrap();
        let from_yaml: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE_YAML).unwrap();

        for config in [from_toml, from_yaml] {
            assert_eq!(config.git.remote, "origin");
            assert_eq!(config.git.branch, "master");
            assert_eq!(config.npm.program, "npm");
            assert!(!config.defaults.silent());
        }
    }
}
