//! Equity options and their underlying.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ValuationError, ValuationResult};
use crate::types::Date;

/// Market state of an equity underlying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Underlying {
    /// Ticker symbol, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Spot price. Must be positive for pricing.
    pub spot_price: f64,
    /// Annualized volatility σ. Must be positive for pricing.
    pub volatility: f64,
    /// Continuously compounded dividend yield q.
    #[serde(default)]
    pub dividend_yield: f64,
}

impl Underlying {
    /// Creates an underlying with no dividend yield.
    #[must_use]
    pub fn new(spot_price: f64, volatility: f64) -> Self {
        Self {
            symbol: None,
            spot_price,
            volatility,
            dividend_yield: 0.0,
        }
    }

    /// Sets the continuously compounded dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the ticker symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns the other side of put-call parity.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Call => Self::Put,
            Self::Put => Self::Call,
        }
    }

    /// Payoff of exercising at `spot` against `strike`.
    #[must_use]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            _ => Err(ValuationError::InvalidOptionType(s.to_string())),
        }
    }
}

/// Exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStyle {
    /// Exercisable only at expiry.
    European,
    /// Exercisable at any time up to expiry.
    American,
}

impl fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::European => write!(f, "european"),
            Self::American => write!(f, "american"),
        }
    }
}

impl FromStr for OptionStyle {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "european" | "eu" => Ok(Self::European),
            "american" | "us" => Ok(Self::American),
            _ => Err(ValuationError::InvalidOptionStyle(s.to_string())),
        }
    }
}

/// An option on an equity underlying.
///
/// The option borrows its [`Underlying`] rather than copying it, so pricing
/// always reads the caller's current spot, volatility and dividend yield.
/// Pricing engines never mutate the option or its underlying.
///
/// # Example
///
/// ```rust
/// use fairval_core::{FinancialOption, OptionStyle, OptionType, Underlying};
///
/// let stock = Underlying::new(42.0, 0.2);
/// let call = FinancialOption::european_call(&stock, 40.0, 0.5);
/// let put = call.opposite();
/// assert_eq!(put.option_type, OptionType::Put);
/// assert_eq!(put.option_style, OptionStyle::European);
/// assert_eq!(call.intrinsic_value(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialOption<'a> {
    /// The underlying equity.
    pub underlying: &'a Underlying,
    /// Strike price K.
    pub strike: f64,
    /// Time to expiry T in years.
    pub time_to_expiry: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// European or American.
    pub option_style: OptionStyle,
}

impl<'a> FinancialOption<'a> {
    /// Creates an option with explicit type and style.
    #[must_use]
    pub fn new(
        underlying: &'a Underlying,
        strike: f64,
        time_to_expiry: f64,
        option_type: OptionType,
        option_style: OptionStyle,
    ) -> Self {
        Self {
            underlying,
            strike,
            time_to_expiry,
            option_type,
            option_style,
        }
    }

    /// Creates a European option.
    #[must_use]
    pub fn european(
        underlying: &'a Underlying,
        strike: f64,
        time_to_expiry: f64,
        option_type: OptionType,
    ) -> Self {
        Self::new(
            underlying,
            strike,
            time_to_expiry,
            option_type,
            OptionStyle::European,
        )
    }

    /// Creates a European call.
    #[must_use]
    pub fn european_call(underlying: &'a Underlying, strike: f64, time_to_expiry: f64) -> Self {
        Self::european(underlying, strike, time_to_expiry, OptionType::Call)
    }

    /// Creates a European put.
    #[must_use]
    pub fn european_put(underlying: &'a Underlying, strike: f64, time_to_expiry: f64) -> Self {
        Self::european(underlying, strike, time_to_expiry, OptionType::Put)
    }

    /// Creates an American option.
    #[must_use]
    pub fn american(
        underlying: &'a Underlying,
        strike: f64,
        time_to_expiry: f64,
        option_type: OptionType,
    ) -> Self {
        Self::new(
            underlying,
            strike,
            time_to_expiry,
            option_type,
            OptionStyle::American,
        )
    }

    /// Creates an option whose time to expiry is the ACT/365 Fixed year
    /// fraction between `pricing_date` and `expiry`.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Domain` if `expiry` is not after `pricing_date`.
    pub fn with_expiry_date(
        underlying: &'a Underlying,
        strike: f64,
        pricing_date: Date,
        expiry: Date,
        option_type: OptionType,
        option_style: OptionStyle,
    ) -> ValuationResult<Self> {
        let time_to_expiry = pricing_date.year_fraction_to(&expiry);
        if time_to_expiry <= 0.0 {
            return Err(ValuationError::domain(
                "time_to_expiry",
                time_to_expiry,
                format!("expiry {expiry} must be after pricing date {pricing_date}"),
            ));
        }
        Ok(Self::new(
            underlying,
            strike,
            time_to_expiry,
            option_type,
            option_style,
        ))
    }

    /// Returns the opposite side (call ↔ put) with identical terms.
    #[must_use]
    pub fn opposite(&self) -> Self {
        Self {
            option_type: self.option_type.opposite(),
            ..*self
        }
    }

    /// Payoff if exercised immediately at the current spot.
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type
            .intrinsic(self.underlying.spot_price, self.strike)
    }
}
