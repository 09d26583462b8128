//! Typed configuration records for the `@fake`, `@examples` and `@sample` directives.
//!
//! Directive arguments are deserialized from their JSON form with unknown keys
//! rejected, so a typo in a schema annotation fails when the schema is faked
//! rather than silently producing default data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arguments of `@fake(type:, options:, locale:)`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FakeConfig {
    #[serde(rename = "type")]
    pub kind: FakeKind,
    #[serde(default)]
    pub options: FakeOptions,
    #[serde(default)]
    pub locale: Option<Locale>,
}

impl FakeConfig {
    pub fn new(kind: FakeKind) -> Self {
        Self {
            kind,
            options: FakeOptions::default(),
            locale: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.options.validate()
    }
}

/// Generator kinds accepted by `@fake(type:)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FakeKind {
    // Address
    ZipCode,
    City,
    StreetName,
    StreetAddress,
    SecondaryAddress,
    Country,
    CountryCode,
    State,
    StateAbbr,
    Latitude,
    Longitude,

    // Commerce and company
    ColorName,
    ProductCategory,
    ProductName,
    Money,
    CompanyName,
    CompanyCatchPhrase,
    CompanyBs,
    CurrencyCode,
    CurrencyName,
    CurrencySymbol,

    // Dates
    PastDate,
    FutureDate,
    RecentDate,

    // Internet
    Email,
    Url,
    DomainName,
    Ipv4Address,
    Ipv6Address,
    UserAgent,
    ColorHex,
    MacAddress,
    Password,
    ImageUrl,
    AvatarUrl,

    // Text
    Lorem,
    Word,
    Words,

    // People
    FirstName,
    LastName,
    FullName,
    JobTitle,
    PhoneNumber,

    // Misc
    Number,
    Uuid,
    Filename,
    FileExtension,
}

/// Locales accepted by `@fake(locale:)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "zh_CN")]
    ZhCn,
    #[serde(rename = "zh_TW")]
    ZhTw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoremSize {
    Word,
    Words,
    Sentence,
    Sentences,
    Paragraph,
    Paragraphs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseColor {
    #[serde(default)]
    pub red255: u8,
    #[serde(default)]
    pub green255: u8,
    #[serde(default)]
    pub blue255: u8,
}

/// Options accepted by `@fake(options:)`
///
/// Every option is optional; generators pick their own defaults for unset ones.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FakeOptions {
    pub use_full_address: Option<bool>,
    pub min_money: Option<f64>,
    pub max_money: Option<f64>,
    pub decimal_places: Option<u32>,
    pub image_size: Option<ImageSize>,
    pub image_keywords: Option<Vec<String>>,
    pub email_provider: Option<String>,
    pub password_length: Option<u32>,
    pub lorem_size: Option<LoremSize>,
    /// strftime-style pattern, e.g. `%Y-%m-%d`
    pub date_format: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub min_number: Option<f64>,
    pub max_number: Option<f64>,
    pub precision_number: Option<f64>,
    pub base_color: Option<BaseColor>,
}

impl FakeOptions {
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_money, self.max_money) {
            if min > max {
                return Err(format!("minMoney ({min}) is greater than maxMoney ({max})"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_number, self.max_number) {
            if min > max {
                return Err(format!("minNumber ({min}) is greater than maxNumber ({max})"));
            }
        }
        if let Some(precision) = self.precision_number {
            if !(precision > 0.0) {
                return Err(format!("precisionNumber must be positive, got {precision}"));
            }
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(format!("dateFrom ({from}) is after dateTo ({to})"));
            }
        }
        if let Some(format) = &self.date_format {
            use chrono::format::{Item, StrftimeItems};
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(format!("invalid dateFormat '{format}'"));
            }
        }
        if let Some(ImageSize { width, height }) = self.image_size {
            if width == 0 || height == 0 {
                return Err("imageSize width and height must be non-zero".to_string());
            }
        }
        Ok(())
    }
}

/// Arguments of `@examples(values:, type:)`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExamplesConfig {
    pub values: Vec<Value>,
    /// Concrete type the examples impersonate when placed on an abstract field
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

impl ExamplesConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.values.is_empty() {
            return Err("values must not be empty".to_string());
        }
        Ok(())
    }
}

/// Arguments of `@sample(min:, max:, size:)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleConfig {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub size: Option<u32>,
}

impl SampleConfig {
    /// Largest list length a `@sample` declaration may ask for
    pub const MAX_LEN: u32 = 10_000;

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("min", self.min), ("max", self.max), ("size", self.size)] {
            if let Some(value) = value.filter(|value| *value > Self::MAX_LEN) {
                return Err(format!("{name} ({value}) exceeds the limit of {}", Self::MAX_LEN));
            }
        }
        Ok(())
    }
}

/// The three directive configurations that apply to one schema node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveSet {
    pub fake: Option<FakeConfig>,
    pub examples: Option<ExamplesConfig>,
    pub sample: Option<SampleConfig>,
}

impl DirectiveSet {
    /// Field-level configuration layered over type-level configuration,
    /// one directive kind at a time.
    pub fn over(self, type_level: DirectiveSet) -> DirectiveSet {
        DirectiveSet {
            fake: self.fake.or(type_level.fake),
            examples: self.examples.or(type_level.examples),
            sample: self.sample.or(type_level.sample),
        }
    }
}
