//! Built-in default indicator and exclusion tables
//!
//! A starting point distilled from screening runs over procurement, patent,
//! and corporate-registry feeds. Deployments that need different coverage or
//! a different Taiwan policy override these through a YAML config instead of
//! editing code.

use sinoscreen_core::{SignalTier, Thresholds};

use crate::config::{CountrySignalSpec, RegistryConfig};
use crate::exclusion::ExclusionSpec;
use crate::indicator::IndicatorSpec;

const STRONG: f32 = 0.95;

/// The default registry configuration
pub fn default_config() -> RegistryConfig {
    RegistryConfig {
        indicators: indicators(),
        exclusions: exclusions(),
        country_signals: country_signals(),
        thresholds: Some(Thresholds::default()),
    }
}

fn indicators() -> Vec<IndicatorSpec> {
    let mut specs = Vec::new();

    // Named companies and groups
    for name in [
        "huawei",
        "alibaba",
        "tencent",
        "baidu",
        "xiaomi",
        "lenovo",
        "hikvision",
        "dahua",
        "sinopec",
        "sinochem",
        "china mobile",
        "china telecom",
        "china unicom",
        "cnooc",
        "cosco",
    ] {
        specs.push(IndicatorSpec::literal(name, SignalTier::Strong, STRONG).with_category("company"));
    }

    // Short acronyms need word boundaries ("smic" sits inside "cosmic")
    for acronym in ["zte", "byd", "dji", "smic", "catl"] {
        specs.push(
            IndicatorSpec::regex(acronym, format!(r"\b{}\b", acronym), SignalTier::Strong, STRONG)
                .with_category("company"),
        );
    }

    // Research and academic institutions
    for name in [
        "chinese academy of sciences",
        "chinese academy of engineering",
        "tsinghua university",
        "peking university",
        "fudan university",
        "harbin institute of technology",
        "national university of defense technology",
    ] {
        specs.push(
            IndicatorSpec::literal(name, SignalTier::Strong, STRONG).with_category("research"),
        );
    }

    // Defense and state-owned conglomerates
    for name in ["norinco", "china state construction", "crrc", "citic group"] {
        specs.push(
            IndicatorSpec::literal(name, SignalTier::Strong, STRONG).with_category("state_owned"),
        );
    }
    specs.push(
        IndicatorSpec::regex(
            "china-state-prefix",
            r"china\s+(?:state|national|aerospace|electronics|railway|shipbuilding)",
            SignalTier::Strong,
            STRONG,
        )
        .with_category("state_owned"),
    );

    // Major cities
    for name in [
        "beijing",
        "shanghai",
        "shenzhen",
        "guangzhou",
        "wuhan",
        "chengdu",
        "nanjing",
        "tianjin",
        "chongqing",
        "hangzhou",
    ] {
        specs.push(IndicatorSpec::literal(name, SignalTier::Strong, STRONG).with_category("city"));
    }

    // Country name and native-script forms
    specs.push(
        IndicatorSpec::literal("china", SignalTier::Strong, STRONG).with_category("country_name"),
    );
    specs.push(IndicatorSpec::literal("中国", SignalTier::Strong, STRONG).with_category("script"));
    specs.push(
        IndicatorSpec::literal("有限公司", SignalTier::Strong, STRONG).with_category("legal_form"),
    );

    // Generic terms that only accumulate
    specs.push(
        IndicatorSpec::literal("chinese", SignalTier::Medium, 0.35).with_category("adjective"),
    );
    specs.push(IndicatorSpec::regex("prc", r"\bprc\b", SignalTier::Medium, 0.4));
    specs.push(IndicatorSpec::regex("sino-prefix", r"\bsino[- ]", SignalTier::Medium, 0.35));
    for name in [
        "guangdong", "zhejiang", "jiangsu", "sichuan", "shandong", "fujian", "hunan", "anhui",
    ] {
        specs.push(IndicatorSpec::literal(name, SignalTier::Medium, 0.4).with_category("province"));
    }
    specs.push(
        IndicatorSpec::literal("belt and road", SignalTier::Medium, 0.3)
            .with_category("initiative"),
    );
    specs.push(
        IndicatorSpec::literal("confucius institute", SignalTier::Medium, 0.45)
            .with_category("institute"),
    );
    specs.push(IndicatorSpec::literal("renminbi", SignalTier::Medium, 0.25).with_category("currency"));
    specs.push(
        IndicatorSpec::regex("rmb", r"\brmb\b", SignalTier::Medium, 0.25).with_category("currency"),
    );

    // Internet domain evidence
    for suffix in [".cn", ".com.cn", ".edu.cn", ".gov.cn", ".org.cn", ".ac.cn"] {
        specs.push(IndicatorSpec::literal(suffix, SignalTier::DomainSuffix, 0.45));
    }

    specs
}

fn exclusions() -> Vec<ExclusionSpec> {
    vec![
        // Product-origin phrasing is not entity affiliation
        ExclusionSpec::suppress(
            "made_in_china_phrasing",
            r"(?:made|manufactured|produced|assembled)\s+in\s+(?:the\s+)?(?:china|prc)",
        ),
        // Porcelain/tableware senses of "china"
        ExclusionSpec::suppress(
            "porcelain_reference",
            r"\bfine\s+china\b|\bbone\s+china\b|china\s+(?:shop|cabinet|tableware|plates?)",
        ),
        // Language, culture, and cuisine references
        ExclusionSpec::dampen(
            "language_culture_reference",
            r"chinese\s+(?:language|culture|cultural|cuisine|medicine|calligraphy|new\s+year|speaking|lessons?|classes?)",
            0.3,
        ),
        // Historical references
        ExclusionSpec::dampen(
            "historical_reference",
            r"(?:ancient|imperial|historical|dynastic)\s+china",
            0.3,
        ),
        // Legal suffixes that point away from a Chinese registration.
        // Dot-terminated forms take no trailing boundary: '.' to whitespace
        // is not a word-boundary transition.
        ExclusionSpec::dampen(
            "non_chinese_legal_suffix",
            r"\b(?:gmbh|ab|oyj?|a/s|pty\s+ltd)\b|\b(?:s\.a\.|s\.r\.l\.|b\.v\.|s\.p\.a\.)",
            0.6,
        ),
    ]
}

fn country_signals() -> Vec<CountrySignalSpec> {
    let mut signals = Vec::new();

    for code in ["CN", "CHN", "HK", "HKG", "MO", "MAC"] {
        signals.push(CountrySignalSpec {
            code: code.to_string(),
            tier: SignalTier::Strong,
            base_confidence: STRONG,
            category: Some("country_code".to_string()),
        });
    }

    // Taiwan stays a separate, lower-weight signal by default. Deployments
    // that fold TW into the strong set do so in config.
    for code in ["TW", "TWN"] {
        signals.push(CountrySignalSpec {
            code: code.to_string(),
            tier: SignalTier::Medium,
            base_confidence: 0.45,
            category: Some("country_code".to_string()),
        });
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::IndicatorRegistry;

    #[test]
    fn test_default_config_compiles() {
        let registry = IndicatorRegistry::from_config(&default_config()).unwrap();
        let stats = registry.stats();
        assert!(stats.strong > 30);
        assert!(stats.medium > 10);
        assert_eq!(stats.domain_suffix, 6);
        assert_eq!(stats.exclusions, 5);
    }

    #[test]
    fn test_taiwan_is_not_strong_by_default() {
        let registry = IndicatorRegistry::from_config(&default_config()).unwrap();
        let tw = registry.country_signal("TW").unwrap();
        assert_eq!(tw.tier, sinoscreen_core::SignalTier::Medium);
        assert!(tw.base_confidence < 0.5);

        let cn = registry.country_signal("CN").unwrap();
        assert_eq!(cn.tier, sinoscreen_core::SignalTier::Strong);
    }

    #[test]
    fn test_default_config_yaml_round_trip() {
        let config = default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = RegistryConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
