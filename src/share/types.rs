//! Glucose reading types and their classifications.

use core::fmt;

/// Rate-of-change direction reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Rising quickly
    DoubleUp,
    /// Rising
    SingleUp,
    /// Rising slightly
    FortyFiveUp,
    /// Steady
    Flat,
    /// Falling slightly
    FortyFiveDown,
    /// Falling
    SingleDown,
    /// Falling quickly
    DoubleDown,
    /// No trend available
    NotComputable,
    /// Rate of change outside the measurable range
    RateOutOfRange,
}

impl Trend {
    /// All trends, in the order the service numbers them.
    pub const ALL: [Trend; 9] = [
        Trend::DoubleUp,
        Trend::SingleUp,
        Trend::FortyFiveUp,
        Trend::Flat,
        Trend::FortyFiveDown,
        Trend::SingleDown,
        Trend::DoubleDown,
        Trend::NotComputable,
        Trend::RateOutOfRange,
    ];

    /// Label used by the service for this trend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::DoubleUp => "DoubleUp",
            Trend::SingleUp => "SingleUp",
            Trend::FortyFiveUp => "FortyFiveUp",
            Trend::Flat => "Flat",
            Trend::FortyFiveDown => "FortyFiveDown",
            Trend::SingleDown => "SingleDown",
            Trend::DoubleDown => "DoubleDown",
            Trend::NotComputable => "NotComputable",
            Trend::RateOutOfRange => "RateOutOfRange",
        }
    }

    /// Arrow for this trend; `?` and `-` for the undirected ones.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::DoubleUp => "↑↑",
            Trend::SingleUp => "↑",
            Trend::FortyFiveUp => "↗",
            Trend::Flat => "→",
            Trend::FortyFiveDown => "↘",
            Trend::SingleDown => "↓",
            Trend::DoubleDown => "↓↓",
            Trend::NotComputable => "?",
            Trend::RateOutOfRange => "-",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Trend::DoubleUp => "rising quickly",
            Trend::SingleUp => "rising",
            Trend::FortyFiveUp => "rising slightly",
            Trend::Flat => "steady",
            Trend::FortyFiveDown => "falling slightly",
            Trend::SingleDown => "falling",
            Trend::DoubleDown => "falling quickly",
            Trend::NotComputable => "unable to determine trend",
            Trend::RateOutOfRange => "trend unavailable",
        }
    }

    /// Whether this trend carries a direction.
    pub fn is_directional(&self) -> bool {
        !matches!(self, Trend::NotComputable | Trend::RateOutOfRange)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trend combined with the zone the value sits in.
///
/// Only the high/low thresholds take part; urgent thresholds are reported
/// through [`Range`] alone.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvancedTrend {
    DoubleUpHigh,
    DoubleUpInRange,
    DoubleUpLow,
    SingleUpHigh,
    SingleUpInRange,
    SingleUpLow,
    FortyFiveUpHigh,
    FortyFiveUpInRange,
    FortyFiveUpLow,
    FlatHigh,
    FlatInRange,
    FlatLow,
    FortyFiveDownHigh,
    FortyFiveDownInRange,
    FortyFiveDownLow,
    SingleDownHigh,
    SingleDownInRange,
    SingleDownLow,
    DoubleDownHigh,
    DoubleDownInRange,
    DoubleDownLow,
    /// The trend has no direction.
    Unknown,
}

impl AdvancedTrend {
    /// Name of the combined value, e.g. `FlatHigh`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvancedTrend::DoubleUpHigh => "DoubleUpHigh",
            AdvancedTrend::DoubleUpInRange => "DoubleUpInRange",
            AdvancedTrend::DoubleUpLow => "DoubleUpLow",
            AdvancedTrend::SingleUpHigh => "SingleUpHigh",
            AdvancedTrend::SingleUpInRange => "SingleUpInRange",
            AdvancedTrend::SingleUpLow => "SingleUpLow",
            AdvancedTrend::FortyFiveUpHigh => "FortyFiveUpHigh",
            AdvancedTrend::FortyFiveUpInRange => "FortyFiveUpInRange",
            AdvancedTrend::FortyFiveUpLow => "FortyFiveUpLow",
            AdvancedTrend::FlatHigh => "FlatHigh",
            AdvancedTrend::FlatInRange => "FlatInRange",
            AdvancedTrend::FlatLow => "FlatLow",
            AdvancedTrend::FortyFiveDownHigh => "FortyFiveDownHigh",
            AdvancedTrend::FortyFiveDownInRange => "FortyFiveDownInRange",
            AdvancedTrend::FortyFiveDownLow => "FortyFiveDownLow",
            AdvancedTrend::SingleDownHigh => "SingleDownHigh",
            AdvancedTrend::SingleDownInRange => "SingleDownInRange",
            AdvancedTrend::SingleDownLow => "SingleDownLow",
            AdvancedTrend::DoubleDownHigh => "DoubleDownHigh",
            AdvancedTrend::DoubleDownInRange => "DoubleDownInRange",
            AdvancedTrend::DoubleDownLow => "DoubleDownLow",
            AdvancedTrend::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AdvancedTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone of a glucose value relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    /// Below the urgent-low threshold
    UrgentLow,
    /// Below the low threshold
    TooLow,
    /// Between the low and high thresholds
    InRange,
    /// At or above the high threshold
    TooHigh,
    /// Above the urgent-high threshold
    UrgentHigh,
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Range::UrgentLow => "UrgentLow",
            Range::TooLow => "TooLow",
            Range::InRange => "InRange",
            Range::TooHigh => "TooHigh",
            Range::UrgentHigh => "UrgentHigh",
        })
    }
}

/// A classified glucose reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Glucose concentration in mg/dL, `-1` for [`Reading::UNAVAILABLE`].
    pub value: i32,
    /// Reported trend.
    pub trend: Trend,
    /// Trend combined with the high/low zone.
    pub advanced_trend: AdvancedTrend,
    /// Zone relative to all four thresholds.
    pub range: Range,
    /// Reading time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Reading {
    /// Returned by [`ShareClient::get_last_glucose`](super::ShareClient::get_last_glucose)
    /// when no reading could be fetched.
    pub const UNAVAILABLE: Reading = Reading {
        value: -1,
        trend: Trend::NotComputable,
        advanced_trend: AdvancedTrend::Unknown,
        range: Range::InRange,
        timestamp: 0,
    };

    /// `false` only for [`Reading::UNAVAILABLE`].
    pub fn is_valid(&self) -> bool {
        self.value != -1
    }

    /// Concentration in mmol/L, rounded to one decimal.
    pub fn mmol_l(&self) -> f32 {
        // 0.0555 mmol/L per mg/dL, computed in tenths to round without libm
        let tenths = (i64::from(self.value) * 555 + 500).div_euclid(1000);
        tenths as f32 / 10.0
    }
}

/// Outcome of the most recent exchange with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountStatus {
    /// No login has succeeded yet.
    #[default]
    LoggedOut,
    /// Both login steps returned a token.
    LoggedIn,
    /// The session id was rejected.
    SessionNotValid,
    /// The session id is unknown to the service.
    SessionNotFound,
    /// No account with the given user name.
    AccountNotFound,
    /// Wrong password.
    PasswordInvalid,
    /// Too many failed login attempts.
    MaxAttemptsExceeded,
    /// The user name was empty.
    UsernameNullEmpty,
    /// The password was empty.
    PasswordNullEmpty,
    /// A login step answered 200 without a usable token.
    EmptyToken,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccountStatus::LoggedOut => "logged out",
            AccountStatus::LoggedIn => "logged in",
            AccountStatus::SessionNotValid => "session not valid",
            AccountStatus::SessionNotFound => "session not found",
            AccountStatus::AccountNotFound => "account not found",
            AccountStatus::PasswordInvalid => "password invalid",
            AccountStatus::MaxAttemptsExceeded => "max attempts exceeded",
            AccountStatus::UsernameNullEmpty => "username empty",
            AccountStatus::PasswordNullEmpty => "password empty",
            AccountStatus::EmptyToken => "empty token",
        })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AccountStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            AccountStatus::LoggedOut => defmt::write!(f, "LoggedOut"),
            AccountStatus::LoggedIn => defmt::write!(f, "LoggedIn"),
            AccountStatus::SessionNotValid => defmt::write!(f, "SessionNotValid"),
            AccountStatus::SessionNotFound => defmt::write!(f, "SessionNotFound"),
            AccountStatus::AccountNotFound => defmt::write!(f, "AccountNotFound"),
            AccountStatus::PasswordInvalid => defmt::write!(f, "PasswordInvalid"),
            AccountStatus::MaxAttemptsExceeded => defmt::write!(f, "MaxAttemptsExceeded"),
            AccountStatus::UsernameNullEmpty => defmt::write!(f, "UsernameNullEmpty"),
            AccountStatus::PasswordNullEmpty => defmt::write!(f, "PasswordNullEmpty"),
            AccountStatus::EmptyToken => defmt::write!(f, "EmptyToken"),
        }
    }
}
