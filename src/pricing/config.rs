use crate::pricing::types::PricingRequest;

/// How prices are rendered when display is switched on
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Print prices after each valuation
    pub enabled: bool,
    /// Decimal places shown
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            decimals: 4,
        }
    }
}

/// Top-level configuration for the command-line pricer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct PricerConfig {
    /// Default tracing filter (RUST_LOG takes precedence)
    #[cfg_attr(feature = "serde", serde(default = "default_log_level"))]
    pub log_level: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub display: DisplayConfig,

    /// Requests priced by the `batch` command
    #[cfg_attr(feature = "serde", serde(default))]
    pub requests: Vec<PricingRequest>,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            display: DisplayConfig::default(),
            requests: Vec::new(),
        }
    }
}

impl PricerConfig {
    /// Prices printed, warnings logged
    pub fn interactive() -> Self {
        Self::default()
    }

    /// Nothing printed, only errors logged
    pub fn quiet() -> Self {
        Self {
            log_level: "error".to_string(),
            display: DisplayConfig {
                enabled: false,
                ..DisplayConfig::default()
            },
            requests: Vec::new(),
        }
    }
}

#[cfg(feature = "serde")]
impl PricerConfig {
    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        toml::from_str(src).context("failed to parse pricer configuration")
    }

    /// Reads and parses the TOML file at `path`.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("in {}", path.display()))
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
