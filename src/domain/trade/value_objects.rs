use derive_more::{Display, From, Into};
use serde::{Deserialize, Deserializer, Serialize, de};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - raw currency magnitude in USD
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, From, Into, Serialize, Deserialize)]
pub struct Usd(f64);

impl Usd {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - calendar year of a trade record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize)]
pub struct Year(i32);

impl Year {
    pub fn value(&self) -> i32 {
        self.0
    }
}

// Годы приходят и числом, и строкой, и float-ом ("2021", 2021, 2021.0)
impl<'de> Deserialize<'de> for Year {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawYear {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let year = match RawYear::deserialize(deserializer)? {
            RawYear::Int(v) => v,
            RawYear::Float(v) if v.fract() == 0.0 => v as i64,
            RawYear::Float(v) => return Err(de::Error::custom(format!("fractional year {}", v))),
            RawYear::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| de::Error::custom(format!("invalid year '{}'", s)))?,
        };
        i32::try_from(year)
            .map(Year)
            .map_err(|_| de::Error::custom(format!("year {} out of range", year)))
    }
}

/// Scale a chart's plotted values are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StrumDisplay, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum UnitScale {
    #[strum(serialize = "billions")]
    Billions,
    #[strum(serialize = "millions")]
    Millions,
}

impl UnitScale {
    pub fn divisor(&self) -> f64 {
        match self {
            UnitScale::Billions => 1_000_000_000.0,
            UnitScale::Millions => 1_000_000.0,
        }
    }

    pub fn to_plotted(&self, raw: f64) -> f64 {
        raw / self.divisor()
    }

    pub fn to_raw(&self, plotted: f64) -> f64 {
        plotted * self.divisor()
    }

    /// Axis unit caption, e.g. "млрд USD"
    pub fn axis_unit(&self) -> &'static str {
        match self {
            UnitScale::Billions => "млрд USD",
            UnitScale::Millions => "млн USD",
        }
    }
}

/// Unit label family, fixed when the formatter is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, StrumDisplay, EnumString, EnumIter, AsRefStr)]
pub enum LabelStyle {
    #[default]
    #[strum(serialize = "ru")]
    #[serde(rename = "ru")]
    Russian,
    #[strum(serialize = "compact")]
    #[serde(rename = "compact")]
    Compact,
}

/// Which flow a ranked view measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StrumDisplay)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    #[strum(serialize = "export")]
    Export,
    #[strum(serialize = "import")]
    Import,
}
