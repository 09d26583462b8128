use base64::Engine as _;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fake::faker::address::raw::{
    BuildingNumber, CityName, CountryCode, CountryName, SecondaryAddress, StateAbbr, StateName,
    StreetName, ZipCode,
};
use fake::faker::company::raw::{Bs, Buzzword, CatchPhrase, CompanyName, Industry};
use fake::faker::currency::raw::{CurrencyCode, CurrencyName, CurrencySymbol};
use fake::faker::filesystem::raw::{FileExtension, FileName};
use fake::faker::internet::raw::{
    DomainSuffix, IPv4, IPv6, MACAddress, Password, SafeEmail, UserAgent, Username,
};
use fake::faker::job::raw::Title as JobTitle;
use fake::faker::lorem::raw::{Paragraph, Paragraphs, Sentence, Sentences, Word, Words};
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{Data, EN, FR_FR, JA_JP, ZH_CN, ZH_TW};
use fake::Fake;
use rand::Rng;
use serde_json::{json, Value};

use crate::config::FakerSettings;
use crate::domain::directives::{BaseColor, ImageSize, LoremSize};
use crate::domain::{FakeConfig, FakeKind, FakeOptions, Locale, ValueFaker};

const COLOR_NAMES: &[&str] = &[
    "black", "blue", "brown", "cyan", "gold", "gray", "green", "indigo", "ivory", "lavender",
    "lime", "magenta", "maroon", "mint", "navy", "olive", "orange", "orchid", "pink", "plum",
    "purple", "red", "salmon", "silver", "sky blue", "tan", "teal", "turquoise", "violet",
    "white", "yellow",
];

/// [`ValueFaker`] backed by the `fake` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFaker {
    default_locale: Locale,
}

impl StdFaker {
    pub fn new(default_locale: Locale) -> Self {
        Self { default_locale }
    }

    pub fn from_settings(settings: &FakerSettings) -> Self {
        Self::new(settings.default_locale)
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }
}

impl ValueFaker for StdFaker {
    fn scalar(&self, type_name: &str) -> Option<Value> {
        let mut rng = rand::thread_rng();
        let value = match type_name {
            "Int" => json!(rng.gen_range(0..=99999)),
            "Float" => json!(round_to(rng.gen_range(0.0..99999.0), 2)),
            "String" => json!(Word(EN).fake::<String>()),
            "Boolean" => json!(rng.gen_bool(0.5)),
            "ID" => {
                let id: u64 = rng.gen_range(0..1_000_000_000);
                json!(base64::engine::general_purpose::STANDARD.encode(id.to_string()))
            }
            _ => return None,
        };
        Some(value)
    }

    fn generate(&self, config: &FakeConfig) -> Value {
        match config.locale.unwrap_or(self.default_locale) {
            Locale::En => generate_in(EN, config.kind, &config.options),
            Locale::Fr => generate_in(FR_FR, config.kind, &config.options),
            Locale::Ja => generate_in(JA_JP, config.kind, &config.options),
            Locale::ZhCn => generate_in(ZH_CN, config.kind, &config.options),
            Locale::ZhTw => generate_in(ZH_TW, config.kind, &config.options),
        }
    }
}

fn generate_in<L: Data + Copy>(locale: L, kind: FakeKind, options: &FakeOptions) -> Value {
    let mut rng = rand::thread_rng();
    match kind {
        // Address
        FakeKind::ZipCode => json!(ZipCode(locale).fake::<String>()),
        FakeKind::City => json!(CityName(locale).fake::<String>()),
        FakeKind::StreetName => json!(StreetName(locale).fake::<String>()),
        FakeKind::StreetAddress => {
            let street = format!(
                "{} {}",
                BuildingNumber(locale).fake::<String>(),
                StreetName(locale).fake::<String>()
            );
            if options.use_full_address.unwrap_or(false) {
                json!(format!(
                    "{}, {}, {} {}",
                    street,
                    CityName(locale).fake::<String>(),
                    StateAbbr(locale).fake::<String>(),
                    ZipCode(locale).fake::<String>()
                ))
            } else {
                json!(street)
            }
        }
        FakeKind::SecondaryAddress => json!(SecondaryAddress(locale).fake::<String>()),
        FakeKind::Country => json!(CountryName(locale).fake::<String>()),
        FakeKind::CountryCode => json!(CountryCode(locale).fake::<String>()),
        FakeKind::State => json!(StateName(locale).fake::<String>()),
        FakeKind::StateAbbr => json!(StateAbbr(locale).fake::<String>()),
        FakeKind::Latitude => json!(round_to(rng.gen_range(-90.0..=90.0), 6)),
        FakeKind::Longitude => json!(round_to(rng.gen_range(-180.0..=180.0), 6)),

        // Commerce and company
        FakeKind::ColorName => json!(COLOR_NAMES[rng.gen_range(0..COLOR_NAMES.len())]),
        FakeKind::ProductCategory => json!(Industry(locale).fake::<String>()),
        FakeKind::ProductName => json!(format!(
            "{} {}",
            capitalize(&Buzzword(locale).fake::<String>()),
            capitalize(&Word(locale).fake::<String>())
        )),
        FakeKind::Money => {
            let min = options.min_money.unwrap_or(0.0);
            let max = options.max_money.unwrap_or(1000.0).max(min);
            let places = options.decimal_places.unwrap_or(2) as usize;
            json!(format!("{:.*}", places, rng.gen_range(min..=max)))
        }
        FakeKind::CompanyName => json!(CompanyName(locale).fake::<String>()),
        FakeKind::CompanyCatchPhrase => json!(CatchPhrase(locale).fake::<String>()),
        FakeKind::CompanyBs => json!(Bs(locale).fake::<String>()),
        FakeKind::CurrencyCode => json!(CurrencyCode(locale).fake::<String>()),
        FakeKind::CurrencyName => json!(CurrencyName(locale).fake::<String>()),
        FakeKind::CurrencySymbol => json!(CurrencySymbol(locale).fake::<String>()),

        // Dates
        FakeKind::PastDate | FakeKind::FutureDate | FakeKind::RecentDate => fake_date(kind, options),

        // Internet
        FakeKind::Email => match &options.email_provider {
            Some(provider) => json!(format!("{}@{}", Username(locale).fake::<String>(), provider)),
            None => json!(SafeEmail(locale).fake::<String>()),
        },
        FakeKind::Url => json!(format!("https://{}", domain_name(locale))),
        FakeKind::DomainName => json!(domain_name(locale)),
        FakeKind::Ipv4Address => json!(IPv4(locale).fake::<String>()),
        FakeKind::Ipv6Address => json!(IPv6(locale).fake::<String>()),
        FakeKind::UserAgent => json!(UserAgent(locale).fake::<String>()),
        FakeKind::ColorHex => json!(color_hex(options.base_color)),
        FakeKind::MacAddress => json!(MACAddress(locale).fake::<String>()),
        FakeKind::Password => {
            let length = options.password_length.unwrap_or(10).max(1) as usize;
            json!(Password(locale, length..length + 1).fake::<String>())
        }
        FakeKind::ImageUrl => json!(image_url(options.image_size, options.image_keywords.as_deref())),
        FakeKind::AvatarUrl => json!(format!("https://i.pravatar.cc/300?u={}", uuid::Uuid::new_v4())),

        // Text
        FakeKind::Lorem => json!(lorem(locale, options.lorem_size.unwrap_or(LoremSize::Sentence))),
        FakeKind::Word => json!(Word(locale).fake::<String>()),
        FakeKind::Words => json!(lorem(locale, LoremSize::Words)),

        // People
        FakeKind::FirstName => json!(FirstName(locale).fake::<String>()),
        FakeKind::LastName => json!(LastName(locale).fake::<String>()),
        FakeKind::FullName => json!(Name(locale).fake::<String>()),
        FakeKind::JobTitle => json!(JobTitle(locale).fake::<String>()),
        FakeKind::PhoneNumber => json!(PhoneNumber(locale).fake::<String>()),

        // Misc
        FakeKind::Number => fake_number(options),
        FakeKind::Uuid => json!(uuid::Uuid::new_v4().to_string()),
        FakeKind::Filename => json!(FileName(locale).fake::<String>()),
        FakeKind::FileExtension => json!(FileExtension(locale).fake::<String>()),
    }
}

fn lorem<L: Data + Copy>(locale: L, size: LoremSize) -> String {
    match size {
        LoremSize::Word => Word(locale).fake(),
        LoremSize::Words => Words(locale, 3..6).fake::<Vec<String>>().join(" "),
        LoremSize::Sentence => Sentence(locale, 3..10).fake(),
        LoremSize::Sentences => Sentences(locale, 2..5).fake::<Vec<String>>().join(" "),
        LoremSize::Paragraph => Paragraph(locale, 3..6).fake(),
        LoremSize::Paragraphs => Paragraphs(locale, 2..4).fake::<Vec<String>>().join("\n\n"),
    }
}

fn domain_name<L: Data + Copy>(locale: L) -> String {
    format!(
        "{}.{}",
        Word(EN).fake::<String>(),
        DomainSuffix(locale).fake::<String>()
    )
}

fn image_url(size: Option<ImageSize>, keywords: Option<&[String]>) -> String {
    let ImageSize { width, height } = size.unwrap_or(ImageSize {
        width: 640,
        height: 480,
    });
    match keywords {
        Some(keywords) if !keywords.is_empty() => {
            format!("https://loremflickr.com/{width}/{height}/{}", keywords.join(","))
        }
        _ => format!("https://loremflickr.com/{width}/{height}"),
    }
}

/// A random color, mixed half-and-half with `base` when given
fn color_hex(base: Option<BaseColor>) -> String {
    let mut rng = rand::thread_rng();
    let mut channel = |base: Option<u8>| -> u8 {
        let random: u8 = rng.gen();
        match base {
            Some(base) => ((random as u16 + base as u16) / 2) as u8,
            None => random,
        }
    };
    let red = channel(base.map(|b| b.red255));
    let green = channel(base.map(|b| b.green255));
    let blue = channel(base.map(|b| b.blue255));
    format!("#{red:02x}{green:02x}{blue:02x}")
}

fn fake_date(kind: FakeKind, options: &FakeOptions) -> Value {
    let now = Utc::now();
    let window = match kind {
        FakeKind::RecentDate => Duration::days(1),
        _ => Duration::days(365),
    };
    let date_from = options.date_from.and_then(|date| start_of_day(date, 0, 0, 0));
    let date_to = options.date_to.and_then(|date| start_of_day(date, 23, 59, 59));
    // a single explicit bound anchors the window on that side
    let (from, to) = match (date_from, date_to) {
        (Some(from), Some(to)) => (from, to.max(from)),
        (Some(from), None) => (from, from + window),
        (None, Some(to)) => (to - window, to),
        (None, None) => match kind {
            FakeKind::FutureDate => (now, now + window),
            _ => (now - window, now),
        },
    };

    let span = (to - from).num_seconds();
    let date = from + Duration::seconds(rand::thread_rng().gen_range(0..=span));
    match &options.date_format {
        Some(format) => json!(date.format(format).to_string()),
        None => json!(date.to_rfc3339()),
    }
}

fn start_of_day(date: NaiveDate, hour: u32, min: u32, sec: u32) -> Option<DateTime<Utc>> {
    date.and_hms_opt(hour, min, sec)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// A number on the `precisionNumber` grid between `minNumber` and `maxNumber`.
/// Integral grids produce JSON integers.
fn fake_number(options: &FakeOptions) -> Value {
    let min = options.min_number.unwrap_or(0.0);
    let max = options.max_number.unwrap_or(99999.0).max(min);
    let precision = options.precision_number.unwrap_or(1.0);

    let steps = ((max - min) / precision).floor() as u64;
    let value = min + precision * rand::thread_rng().gen_range(0..=steps) as f64;
    if min.fract() == 0.0 && precision.fract() == 0.0 {
        json!(value as i64)
    } else {
        let places = (-precision.log10()).ceil().max(0.0) as i32;
        json!(round_to(value, places))
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
