//! Fixed-point decimal values: a 96-bit signed mantissa and a power-of-ten
//! scale between 0 and 28.
//!
//! Only what the coercion layer needs is provided: construction from parsed
//! digits (with rounding of excess precision), canonical rendering, and
//! lossy conversion to `f64`.

use std::fmt;

/// Largest scale (digits after the decimal point).
pub const MAX_SCALE: u32 = 28;

/// Largest magnitude of the mantissa, `2^96 - 1`.
pub const MAX_MANTISSA: i128 = (1i128 << 96) - 1;

/// A fixed-point decimal number.
///
/// Equality compares numeric value, so `1.50 == 1.5`; rendering keeps the
/// scale, so `1.50` prints as `1.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal { mantissa: 0, scale: 0 };

    /// `mantissa × 10^-scale`, or `None` if either part is out of range.
    pub fn new(mantissa: i128, scale: u32) -> Option<Self> {
        if scale > MAX_SCALE || mantissa.abs() > MAX_MANTISSA {
            return None;
        }
        Some(Self { mantissa, scale })
    }

    pub fn from_i64(n: i64) -> Self {
        Self { mantissa: n as i128, scale: 0 }
    }

    pub fn mantissa(self) -> i128 {
        self.mantissa
    }

    pub fn scale(self) -> u32 {
        self.scale
    }

    pub fn is_zero(self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(self) -> bool {
        self.mantissa < 0
    }

    /// Build from decimal digit text.
    ///
    /// `digits` holds every significant digit (integral then fractional),
    /// `scale` is the number of those digits after the point, and
    /// `exponent` shifts the point.  Precision beyond [`MAX_SCALE`] or the
    /// 96-bit mantissa is rounded half-to-even; a value whose integral part
    /// does not fit returns `None`.
    pub fn from_digits(negative: bool, digits: &str, scale: i64, exponent: i64) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = digits.trim_start_matches('0');
        let mut scale = scale.checked_sub(exponent)?;
        let mut digits = digits.to_owned();
        if digits.is_empty() {
            // Zero keeps its written scale so that `0.00` renders as typed.
            return Self::new(0, scale.clamp(0, MAX_SCALE as i64) as u32);
        }
        if scale < 0 {
            // Move the point right by appending zeros; 29 digits is the most
            // a 96-bit mantissa can hold.
            let zeros = usize::try_from(-scale).ok()?;
            if digits.len() + zeros > 29 {
                return None;
            }
            digits.extend(std::iter::repeat('0').take(zeros));
            scale = 0;
        }

        let mut drop = 0usize;
        if scale > MAX_SCALE as i64 {
            drop = (scale - MAX_SCALE as i64) as usize;
        }
        if digits.len() > 29 {
            drop = drop.max(digits.len() - 29);
        }
        loop {
            if drop as i64 > scale {
                return None;
            }
            let mantissa = round_digits(&digits, drop)?;
            if mantissa <= MAX_MANTISSA {
                let mantissa = if negative { -mantissa } else { mantissa };
                return Self::new(mantissa, (scale - drop as i64) as u32);
            }
            drop += 1;
        }
    }

    /// Remove trailing zeros from the fractional part.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mut d = self;
        while d.scale > 0 && d.mantissa % 10 == 0 {
            d.mantissa /= 10;
            d.scale -= 1;
        }
        d
    }

    /// Whether the value has no fractional part.
    pub fn is_integral(self) -> bool {
        self.normalize().scale == 0
    }

    /// The integral value, if the number has no fractional part and fits.
    pub fn to_i64(self) -> Option<i64> {
        let n = self.normalize();
        if n.scale != 0 {
            return None;
        }
        i64::try_from(n.mantissa).ok()
    }

    /// The decimal nearest a finite double's shortest round-trip text.
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        // `Display` for f64 never uses exponent notation.
        let text = format!("{}", x.abs());
        let (int, frac) = text.split_once('.').unwrap_or((&text, ""));
        let digits = format!("{int}{frac}");
        Self::from_digits(x.is_sign_negative(), &digits, frac.len() as i64, 0)
    }

    pub fn to_f64(self) -> f64 {
        // Going through the rendered text gives the correctly rounded double.
        self.to_string().parse().unwrap_or(f64::NAN)
    }
}

/// The leading `digits.len() - drop` digits as an integer, rounded
/// half-to-even on the dropped tail.
fn round_digits(digits: &str, drop: usize) -> Option<i128> {
    // Every digit falls below the smallest unit.
    let Some(keep) = digits.len().checked_sub(drop) else {
        return Some(0);
    };
    let (head, tail) = digits.split_at(keep);
    let mut value: i128 = if head.is_empty() { 0 } else { head.parse().ok()? };
    let mut tail = tail.bytes();
    if let Some(first) = tail.next() {
        let rest_nonzero = tail.any(|b| b != b'0');
        let round_up = match first {
            b'6'..=b'9' => true,
            b'5' => rest_nonzero || value % 2 == 1,
            _ => false,
        };
        if round_up {
            value += 1;
        }
    }
    Some(value)
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalize(), other.normalize());
        a.mantissa == b.mantissa && a.scale == b.scale
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (int, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int}.{frac}")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
