use super::MaskFamily;

/// Length of the block that precedes pixel data in "region" masks.
pub const REGION_HEADER_LEN: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOverride {
    /// Replace dimensions, width, hemisphere and extent with the family's.
    Family(MaskFamily),
    HeaderLength(usize),
}

/// Fires when any of `tokens` occurs in the identifier.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRule {
    pub tokens: &'static [&'static str],
    pub apply: LayoutOverride,
}

impl LayoutRule {
    pub fn matches(&self, identifier: &str) -> bool {
        self.tokens.iter().any(|token| identifier.contains(token))
    }
}

/// Evaluated top to bottom, every matching rule applies.
pub const LAYOUT_RULES: &[LayoutRule] = &[
    LayoutRule {
        tokens: &["12n"],
        apply: LayoutOverride::Family(MaskFamily::Grid12North),
    },
    LayoutRule {
        tokens: &["12s"],
        apply: LayoutOverride::Family(MaskFamily::Grid12South),
    },
    LayoutRule {
        tokens: &["25n", "pole_n", "region_n", "N17"],
        apply: LayoutOverride::Family(MaskFamily::Grid25North),
    },
    LayoutRule {
        tokens: &["25s", "region_s"],
        apply: LayoutOverride::Family(MaskFamily::Grid25South),
    },
    LayoutRule {
        tokens: &["ntb"],
        apply: LayoutOverride::Family(MaskFamily::Wide25North),
    },
    LayoutRule {
        tokens: &["stb"],
        apply: LayoutOverride::Family(MaskFamily::Wide25South),
    },
    LayoutRule {
        tokens: &["region"],
        apply: LayoutOverride::HeaderLength(REGION_HEADER_LEN),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_matches_any_token() {
        let rule = &LAYOUT_RULES[2];
        assert!(rule.matches("pole_n.msk"));
        assert!(rule.matches("x_N17_y"));
        assert!(!rule.matches("n17.msk"));
    }

    #[test]
    fn test_header_rule_is_last() {
        let last = LAYOUT_RULES.last().unwrap();
        assert_eq!(last.apply, LayoutOverride::HeaderLength(REGION_HEADER_LEN));
    }
}
