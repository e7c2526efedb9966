use std::fmt;
use std::str::FromStr;

use super::model::ChemicalRecord;

// ---------------------------------------------------------------------------
// Derived fields – the lower-cased view a predicate looks at
// ---------------------------------------------------------------------------

/// Lower-cased copies of the fields the category rules inspect.
#[derive(Debug, Clone)]
pub struct DerivedFields<'a> {
    pub category: String,
    pub target: String,
    pub trade: String,
    pub active_ingredient: String,
    pub record: &'a ChemicalRecord,
}

impl<'a> DerivedFields<'a> {
    pub fn new(record: &'a ChemicalRecord) -> Self {
        DerivedFields {
            category: record.category.to_lowercase(),
            target: record.target_pest_disease.to_lowercase(),
            trade: record.trade_name.to_lowercase(),
            active_ingredient: record.active_ingredient.to_lowercase(),
            record,
        }
    }
}

/// A named category test.
pub type Predicate = fn(&DerivedFields<'_>) -> bool;

// ---------------------------------------------------------------------------
// Category rules
//
// The registry's category column is free text, so membership is decided by
// keyword substrings. These are heuristics: a product can land in a category
// its own category column does not mention (e.g. spinosad products).
// ---------------------------------------------------------------------------

const INSECT_TARGETS: [&str; 3] = ["fruit fly", "codling", "bollworm"];
const INSECT_ACTIVES: [&str; 3] = ["spinosad", "azadirachtin", "methoxyfenozide"];

fn insecticides(d: &DerivedFields<'_>) -> bool {
    d.category.contains("insecticide")
        || INSECT_TARGETS.iter().any(|k| d.target.contains(k))
        || d.trade.contains("insect")
        || INSECT_ACTIVES.iter().any(|k| d.active_ingredient.contains(k))
}

fn fungicides(d: &DerivedFields<'_>) -> bool {
    d.category.contains("fungicide")
}

fn adjuvants(d: &DerivedFields<'_>) -> bool {
    d.category.contains("adjuvant")
}

fn herbicides(d: &DerivedFields<'_>) -> bool {
    d.category.contains("herbicide")
}

fn postharvest(d: &DerivedFields<'_>) -> bool {
    d.category.contains("post-harvest")
}

fn mrls(d: &DerivedFields<'_>) -> bool {
    mrl_value(d.record).is_some_and(|v| !v.trim().is_empty())
}

/// The MRL value under any of the spellings a record may carry it.
fn mrl_value(record: &ChemicalRecord) -> Option<&str> {
    if !record.mrl_value.is_empty() {
        return Some(&record.mrl_value);
    }
    ["MRL", "mrl_value"]
        .iter()
        .filter_map(|k| record.raw.get(*k))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Category – the fixed catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Insecticides,
    Fungicides,
    Adjuvants,
    Herbicides,
    Postharvest,
    Mrls,
}

/// Name → rule, in menu order.
pub const CATALOG: [(Category, Predicate); 6] = [
    (Category::Insecticides, insecticides),
    (Category::Fungicides, fungicides),
    (Category::Adjuvants, adjuvants),
    (Category::Herbicides, herbicides),
    (Category::Postharvest, postharvest),
    (Category::Mrls, mrls),
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Insecticides,
        Category::Fungicides,
        Category::Adjuvants,
        Category::Herbicides,
        Category::Postharvest,
        Category::Mrls,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Category::Insecticides => "insecticides",
            Category::Fungicides => "fungicides",
            Category::Adjuvants => "adjuvants",
            Category::Herbicides => "herbicides",
            Category::Postharvest => "postharvest",
            Category::Mrls => "mrls",
        }
    }

    /// Heading shown above a result list.
    pub fn title(self) -> &'static str {
        match self {
            Category::Insecticides => "Insecticides",
            Category::Fungicides => "Fungicides (Pre-Harvest)",
            Category::Adjuvants => "Adjuvants",
            Category::Herbicides => "Herbicides",
            Category::Postharvest => "Post-Harvest",
            Category::Mrls => "MRL's",
        }
    }

    pub fn predicate(self) -> Predicate {
        CATALOG[self as usize].1
    }

    pub fn matches(self, record: &ChemicalRecord) -> bool {
        (self.predicate())(&DerivedFields::new(record))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(category: &str, target: &str, trade: &str, ai: &str) -> ChemicalRecord {
        ChemicalRecord {
            category: category.into(),
            target_pest_disease: target.into(),
            trade_name: trade.into(),
            active_ingredient: ai.into(),
            ..Default::default()
        }
    }

    #[test]
    fn insecticide_clauses_each_match_on_their_own() {
        let hits = [
            rec("Insecticide - biological", "", "", ""),
            rec("", "Queensland Fruit Fly", "", ""),
            rec("", "codling moth", "", ""),
            rec("", "Heliothis / BOLLWORM", "", ""),
            rec("", "", "InsectGuard", ""),
            rec("Miticide", "", "", "Spinosad 480 SC"),
            rec("", "", "", "azadirachtin 1%"),
            rec("", "", "", "Methoxyfenozide"),
        ];
        for r in &hits {
            assert!(Category::Insecticides.matches(r), "{r:?}");
        }
        assert!(!Category::Insecticides.matches(&rec("Fungicide", "Anthracnose", "FungX", "copper")));
    }

    #[test]
    fn single_keyword_categories_only_look_at_category() {
        let cases = [
            (Category::Fungicides, "Fungicide (pre-harvest)"),
            (Category::Adjuvants, "Wetting ADJUVANT"),
            (Category::Herbicides, "Herbicide"),
            (Category::Postharvest, "Post-harvest fungicide"),
        ];
        for (cat, category) in cases {
            assert!(cat.matches(&rec(category, "", "", "")), "{cat} / {category}");
            // keyword elsewhere in the record does not count
            assert!(!cat.matches(&rec("", cat.name(), cat.name(), cat.name())), "{cat}");
        }
        assert!(!Category::Postharvest.matches(&rec("Postharvest", "", "", "")));
    }

    #[test]
    fn mrls_requires_non_blank_value() {
        let mut r = ChemicalRecord::default();
        assert!(!Category::Mrls.matches(&r));
        r.mrl_value = "   ".into();
        assert!(!Category::Mrls.matches(&r));
        r.mrl_value = "0.5".into();
        assert!(Category::Mrls.matches(&r));
    }

    #[test]
    fn mrls_falls_back_to_raw_spellings() {
        let mut r = ChemicalRecord::default();
        r.raw.insert("MRL".into(), "1.0".into());
        assert!(Category::Mrls.matches(&r));
    }

    #[test]
    fn category_names_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.name().parse::<Category>(), Ok(c));
        }
        assert_eq!(" Fungicides ".parse::<Category>(), Ok(Category::Fungicides));
        assert!("pesticides".parse::<Category>().is_err());
    }

    #[test]
    fn catalog_is_indexed_by_category() {
        for (i, c) in Category::ALL.into_iter().enumerate() {
            assert_eq!(CATALOG[i].0, c);
            assert_eq!(c as usize, i);
        }
    }
}
