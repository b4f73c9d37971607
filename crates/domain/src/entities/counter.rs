//! Counter entity - a named temp/perm resource on a character sheet
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: values only change through variant-aware setters
//! - **Valid by construction**: [`CounterBuilder::build`] rejects any state that
//!   breaks the variant's invariants; it never clamps
//! - **Runtime mutations clamp or reject**: see [`Counter::set_temp`]
//! - **Serde validates**: stored documents go through the same checks on load

use serde::{Deserialize, Serialize};

use crate::common::some_if_not_blank;
use crate::error::DomainError;
use crate::value_objects::{validate_name, CounterCategory, CounterVariant, RenderOptions};

const FILLED_GLYPH: &str = ":asterisk:";
const EMPTY_GLYPH: &str = ":stop_button:";
const TRACK_GLYPH: &str = ":red_circle:";
const MARK_GLYPH: &str = ":asterisk:";
const BEDLAM_OPEN_GLYPH: &str = ":regional_indicator_b:";
const BEDLAM_SPENT_GLYPH: &str = ":red_square:";

/// A named numeric resource owned by one character.
///
/// # Invariants
///
/// - `temp`, `perm`, `bedlam` are never negative (stored unsigned)
/// - `PermIsMaximum` / `PermIsMaximumBedlam`: `temp <= perm`
/// - `PermIsMaximumBedlam`: `bedlam <= perm`
///
/// # Example
///
/// ```
/// use sheetkeeper_domain::{Counter, CounterCategory, CounterVariant};
///
/// let mut rage = Counter::builder("Rage", 3, 5, CounterCategory::Tempers)
///     .variant(CounterVariant::PermIsMaximum)
///     .build()
///     .unwrap();
///
/// rage.set_temp(9).unwrap();
/// assert_eq!(rage.temp(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CounterWireFormat", into = "CounterWireFormat")]
pub struct Counter {
    name: String,
    temp: u32,
    perm: u32,
    category: CounterCategory,
    comment: Option<String>,
    bedlam: u32,
    variant: CounterVariant,
}

/// Collects construction arguments; [`build`](CounterBuilder::build) validates them.
#[derive(Debug, Clone)]
pub struct CounterBuilder {
    name: String,
    temp: i64,
    perm: i64,
    category: CounterCategory,
    comment: Option<String>,
    bedlam: i64,
    variant: CounterVariant,
}

impl CounterBuilder {
    pub fn variant(mut self, variant: CounterVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn bedlam(mut self, bedlam: i64) -> Self {
        self.bedlam = bedlam;
        self
    }

    pub fn comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Validate and create the counter.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is blank or too long
    /// - `InvariantViolation` if any value is negative, or the variant caps
    ///   `temp`/`bedlam` at `perm` and the value is larger
    pub fn build(self) -> Result<Counter, DomainError> {
        let name = validate_name("Counter", &self.name)?;
        let temp = checked_initial("temp", self.temp)?;
        let perm = checked_initial("perm", self.perm)?;
        let bedlam = checked_initial("bedlam", self.bedlam)?;

        if self.variant.perm_is_cap() && temp > perm {
            return Err(DomainError::invariant(format!(
                "temp ({temp}) cannot exceed perm ({perm}) for {} counters",
                self.variant
            )));
        }
        if self.variant.has_bedlam() && bedlam > perm {
            return Err(DomainError::invariant(format!(
                "bedlam ({bedlam}) cannot exceed perm ({perm})"
            )));
        }

        Ok(Counter {
            name,
            temp,
            perm,
            category: self.category,
            comment: self.comment.and_then(some_if_not_blank),
            bedlam,
            variant: self.variant,
        })
    }
}

fn checked_initial(field: &str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::invariant(format!(
            "{field} cannot be negative (got {value})"
        )));
    }
    u32::try_from(value)
        .map_err(|_| DomainError::invariant(format!("{field} is too large (got {value})")))
}

/// Values past `u32::MAX` saturate; capped variants then clamp them to perm.
fn checked_update(field: &'static str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::negative(field, value));
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

fn glyph_row<'a>(glyphs: impl Iterator<Item = &'a str>) -> String {
    glyphs.collect::<Vec<_>>().join(" ")
}

impl Counter {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Start building a counter. The variant defaults to `SingleNumber`,
    /// bedlam to 0 and the comment to none.
    pub fn builder(
        name: impl Into<String>,
        temp: i64,
        perm: i64,
        category: CounterCategory,
    ) -> CounterBuilder {
        CounterBuilder {
            name: name.into(),
            temp,
            perm,
            category,
            comment: None,
            bedlam: 0,
            variant: CounterVariant::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn temp(&self) -> u32 {
        self.temp
    }

    #[inline]
    pub fn perm(&self) -> u32 {
        self.perm
    }

    #[inline]
    pub fn category(&self) -> CounterCategory {
        self.category
    }

    #[inline]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[inline]
    pub fn bedlam(&self) -> u32 {
        self.bedlam
    }

    #[inline]
    pub fn variant(&self) -> CounterVariant {
        self.variant
    }

    /// Bedlam points not yet covered by spent temp.
    ///
    /// Spending temp eats into bedlam first: with `perm - temp` spent points,
    /// only the bedlam beyond that is still unspent.
    pub fn unspent_bedlam(&self) -> u32 {
        let spent = self.perm.saturating_sub(self.temp);
        self.bedlam.saturating_sub(spent)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set the current value.
    ///
    /// - `SingleNumber`: sets both temp and perm
    /// - capped variants: values above perm clamp to perm
    /// - other variants: set as given, saturating at `u32::MAX`
    ///
    /// # Errors
    ///
    /// `NegativeValue` if `value < 0`; the counter is left unchanged.
    pub fn set_temp(&mut self, value: i64) -> Result<(), DomainError> {
        let value = checked_update("temp", value)?;
        match self.variant {
            CounterVariant::SingleNumber => {
                self.temp = value;
                self.perm = value;
            }
            CounterVariant::PermIsMaximum | CounterVariant::PermIsMaximumBedlam => {
                self.temp = value.min(self.perm);
            }
            CounterVariant::PermNotMaximum | CounterVariant::Xp | CounterVariant::Health => {
                self.temp = value;
            }
        }
        Ok(())
    }

    /// Set the permanent value.
    ///
    /// Lowering perm on a capped variant pulls temp (and bedlam) down with it.
    ///
    /// # Errors
    ///
    /// `NegativeValue` if `value < 0`; the counter is left unchanged.
    pub fn set_perm(&mut self, value: i64) -> Result<(), DomainError> {
        let value = checked_update("perm", value)?;
        self.perm = value;
        match self.variant {
            CounterVariant::SingleNumber => self.temp = value,
            CounterVariant::PermIsMaximum => self.temp = self.temp.min(value),
            CounterVariant::PermIsMaximumBedlam => {
                self.temp = self.temp.min(value);
                self.bedlam = self.bedlam.min(value);
            }
            CounterVariant::PermNotMaximum | CounterVariant::Xp | CounterVariant::Health => {}
        }
        Ok(())
    }

    /// Set the bedlam overlay.
    ///
    /// # Errors
    ///
    /// - `Validation` if the variant has no bedlam
    /// - `NegativeValue` if `value < 0`
    /// - `BedlamExceedsMax` if `value > perm`
    pub fn set_bedlam(&mut self, value: i64) -> Result<(), DomainError> {
        if !self.variant.has_bedlam() {
            return Err(DomainError::validation(format!(
                "{} does not track bedlam",
                self.name
            )));
        }
        if value < 0 {
            return Err(DomainError::negative("bedlam", value));
        }
        if value > i64::from(self.perm) {
            return Err(DomainError::BedlamExceedsMax {
                bedlam: value,
                perm: self.perm,
            });
        }
        self.bedlam = checked_update("bedlam", value)?;
        Ok(())
    }

    /// Add `delta` to temp under the same rules as [`set_temp`](Self::set_temp).
    pub fn adjust_temp(&mut self, delta: i64) -> Result<(), DomainError> {
        self.set_temp(i64::from(self.temp).saturating_add(delta))
    }

    /// Add `delta` to perm under the same rules as [`set_perm`](Self::set_perm).
    pub fn adjust_perm(&mut self, delta: i64) -> Result<(), DomainError> {
        self.set_perm(i64::from(self.perm).saturating_add(delta))
    }

    /// Replace the comment; blank text clears it.
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment.and_then(some_if_not_blank);
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = validate_name("Counter", &name.into())?;
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the counter as chat text.
    ///
    /// `unescape` is applied to the stored name and comment. Glyph rendering is
    /// only used when `options` asks for it and `perm` is within the threshold.
    pub fn render<F>(&self, unescape: F, options: RenderOptions) -> String
    where
        F: Fn(&str) -> String,
    {
        let name = unescape(&self.name);
        let mut out = if options.draws_glyphs(self.perm) {
            self.render_pretty(&name)
        } else {
            self.render_plain(&name)
        };
        if let Some(comment) = &self.comment {
            out.push_str("\n-# ");
            out.push_str(&unescape(comment));
        }
        out
    }

    fn render_plain(&self, name: &str) -> String {
        let mut out = format!("{name}:\n{}/{}", self.temp, self.perm);
        if self.variant.has_bedlam() {
            out.push_str(&format!(
                " (bedlam: {}/{})",
                self.unspent_bedlam(),
                self.bedlam
            ));
        }
        out
    }

    fn render_pretty(&self, name: &str) -> String {
        let perm = self.perm as usize;
        let temp = self.temp as usize;
        let body = match self.variant {
            CounterVariant::PermNotMaximum => format!(
                "{}\n{}",
                glyph_row(std::iter::repeat(TRACK_GLYPH).take(perm)),
                glyph_row(std::iter::repeat(MARK_GLYPH).take(temp)),
            ),
            CounterVariant::PermIsMaximum => {
                let filled = temp.min(perm);
                glyph_row(
                    std::iter::repeat(FILLED_GLYPH)
                        .take(filled)
                        .chain(std::iter::repeat(EMPTY_GLYPH).take(perm - filled)),
                )
            }
            CounterVariant::PermIsMaximumBedlam => {
                let bedlam_start = perm.saturating_sub(self.bedlam as usize);
                glyph_row((0..perm).map(|i| {
                    match (i >= bedlam_start, i >= temp) {
                        (false, false) => FILLED_GLYPH,
                        (false, true) => EMPTY_GLYPH,
                        (true, false) => BEDLAM_OPEN_GLYPH,
                        (true, true) => BEDLAM_SPENT_GLYPH,
                    }
                }))
            }
            CounterVariant::SingleNumber | CounterVariant::Xp | CounterVariant::Health => {
                self.temp.to_string()
            }
        };
        format!("{name}\n{body}")
    }
}

// ============================================================================
// Serde wire format
// ============================================================================

#[derive(Serialize, Deserialize)]
struct CounterWireFormat {
    name: String,
    temp: i64,
    perm: i64,
    category: CounterCategory,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    bedlam: i64,
    #[serde(default, rename = "counter_type")]
    variant: CounterVariant,
}

impl TryFrom<CounterWireFormat> for Counter {
    type Error = DomainError;

    fn try_from(wire: CounterWireFormat) -> Result<Self, Self::Error> {
        Counter::builder(wire.name, wire.temp, wire.perm, wire.category)
            .variant(wire.variant)
            .bedlam(wire.bedlam)
            .comment(wire.comment)
            .build()
    }
}

impl From<Counter> for CounterWireFormat {
    fn from(counter: Counter) -> Self {
        Self {
            name: counter.name,
            temp: i64::from(counter.temp),
            perm: i64::from(counter.perm),
            category: counter.category,
            comment: counter.comment,
            bedlam: i64::from(counter.bedlam),
            variant: counter.variant,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
