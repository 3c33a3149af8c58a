//! Normalised weather forecasts and the forecast collaborator.
//!
//! Providers report snowfall in different units depending on locale and
//! request options. A [`Snowfall`] therefore always carries its [`SnowUnit`]
//! and is converted explicitly; the unit is never guessed from the magnitude.

use std::fmt;

use crate::{FetchError, Location};

const CENTIMETRES_PER_INCH: f64 = 2.54;
const MILLIMETRES_PER_INCH: f64 = 25.4;

/// Unit a snowfall depth is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SnowUnit {
    /// Inches, the unit closure profiles are authored in.
    #[default]
    Inches,
    /// Centimetres, Open-Meteo's metric default.
    Centimetres,
    /// Millimetres.
    Millimetres,
}

impl SnowUnit {
    /// Parse a unit symbol as reported by forecast providers.
    ///
    /// # Examples
    /// ```
    /// use snowday_core::SnowUnit;
    ///
    /// assert_eq!(SnowUnit::from_symbol("cm"), Some(SnowUnit::Centimetres));
    /// assert_eq!(SnowUnit::from_symbol("inch"), Some(SnowUnit::Inches));
    /// assert_eq!(SnowUnit::from_symbol("furlong"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" | "\"" => Some(Self::Inches),
            "cm" | "centimetre" | "centimetres" | "centimeter" | "centimeters" => {
                Some(Self::Centimetres)
            }
            "mm" | "millimetre" | "millimetres" | "millimeter" | "millimeters" => {
                Some(Self::Millimetres)
            }
            _ => None,
        }
    }

    /// Short symbol used in reasons and reports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inches => "in",
            Self::Centimetres => "cm",
            Self::Millimetres => "mm",
        }
    }

    const fn per_inch(self) -> f64 {
        match self {
            Self::Inches => 1.0,
            Self::Centimetres => CENTIMETRES_PER_INCH,
            Self::Millimetres => MILLIMETRES_PER_INCH,
        }
    }
}

impl fmt::Display for SnowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A non-negative snowfall depth tagged with its unit.
///
/// Non-finite and negative amounts collapse to zero on construction.
///
/// # Examples
/// ```
/// use snowday_core::{SnowUnit, Snowfall};
///
/// let snow = Snowfall::new(15.24, SnowUnit::Centimetres);
/// assert!((snow.inches() - 6.0).abs() < 1e-9);
/// assert_eq!(Snowfall::new(f64::NAN, SnowUnit::Inches).amount(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SnowfallFields")
)]
pub struct Snowfall {
    amount: f64,
    unit: SnowUnit,
}

/// Wire shape of [`Snowfall`]; decoding goes through [`Snowfall::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SnowfallFields {
    amount: f64,
    #[serde(default)]
    unit: SnowUnit,
}

#[cfg(feature = "serde")]
impl From<SnowfallFields> for Snowfall {
    fn from(fields: SnowfallFields) -> Self {
        Self::new(fields.amount, fields.unit)
    }
}

impl Snowfall {
    /// Construct a snowfall depth, normalising invalid amounts to zero.
    #[must_use]
    pub fn new(amount: f64, unit: SnowUnit) -> Self {
        let amount = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            0.0
        };
        Self { amount, unit }
    }

    /// Shorthand for a depth measured in inches.
    #[must_use]
    pub fn inches_of(amount: f64) -> Self {
        Self::new(amount, SnowUnit::Inches)
    }

    /// The amount in the unit it was reported in.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// The unit the amount was reported in.
    #[must_use]
    pub const fn unit(&self) -> SnowUnit {
        self.unit
    }

    /// The depth converted to inches.
    #[must_use]
    pub fn inches(&self) -> f64 {
        self.amount / self.unit.per_inch()
    }
}

impl fmt::Display for Snowfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.amount, self.unit)
    }
}

/// Conditions observed at evaluation time.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentConditions {
    /// Air temperature in degrees Fahrenheit.
    pub temperature: Option<f64>,
    /// Wind speed as reported by the provider.
    pub wind_speed: Option<f64>,
    /// WMO weather interpretation code.
    pub condition_code: Option<u16>,
}

/// Daily aggregates for the forecast day the engine scores ("tomorrow").
///
/// Every measurement is optional; the signal aggregator decides how absence
/// is treated.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyForecast {
    /// ISO-8601 date of the forecast day, if reported.
    pub date: Option<String>,
    /// Total snowfall in [`DailyForecast::snowfall_unit`].
    pub snowfall: Option<f64>,
    /// Unit of [`DailyForecast::snowfall`].
    pub snowfall_unit: SnowUnit,
    /// Total liquid-equivalent precipitation in millimetres.
    pub precipitation_mm: Option<f64>,
    /// Minimum temperature in degrees Fahrenheit.
    pub temperature_min_f: Option<f64>,
    /// Maximum temperature in degrees Fahrenheit.
    pub temperature_max_f: Option<f64>,
}

/// A forecast normalised into the engine's units.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forecast {
    /// Conditions at evaluation time, when the provider reports them.
    pub current: Option<CurrentConditions>,
    /// Aggregates for the next calendar day.
    pub tomorrow: DailyForecast,
}

/// Retrieve a short-range forecast for a location.
///
/// Implementations must return temperatures in Fahrenheit and precipitation
/// in millimetres, converting when the upstream service uses other units, and
/// must tag snowfall with the unit the service reported. Providers must be
/// `Send + Sync`.
///
/// # Examples
///
/// ```
/// use snowday_core::{DailyForecast, FetchError, Forecast, ForecastProvider, Location, SnowUnit};
///
/// struct Blizzard;
///
/// impl ForecastProvider for Blizzard {
///     fn forecast(&self, _location: &Location) -> Result<Forecast, FetchError> {
///         Ok(Forecast {
///             current: None,
///             tomorrow: DailyForecast {
///                 snowfall: Some(12.0),
///                 snowfall_unit: SnowUnit::Inches,
///                 ..DailyForecast::default()
///             },
///         })
///     }
/// }
///
/// let location = Location::new(44.48, -73.21, "Burlington, VT").expect("valid location");
/// let forecast = Blizzard.forecast(&location)?;
/// assert_eq!(forecast.tomorrow.snowfall, Some(12.0));
/// # Ok::<(), FetchError>(())
/// ```
pub trait ForecastProvider: Send + Sync {
    /// Return the forecast for `location`.
    fn forecast(&self, location: &Location) -> Result<Forecast, FetchError>;
}

impl<T: ForecastProvider + ?Sized> ForecastProvider for Box<T> {
    fn forecast(&self, location: &Location) -> Result<Forecast, FetchError> {
        (**self).forecast(location)
    }
}
