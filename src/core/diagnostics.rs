//! Inline scalar diagnostics attached to engine results.

/// Compact key set for engine diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKey {
    Drift,
    Dt,
    Dx,
    NumSpaceSteps,
    NumTimeSteps,
    Pd,
    Pm,
    Pu,
    Vol,
}

impl DiagKey {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drift => "drift",
            Self::Dt => "dt",
            Self::Dx => "dx",
            Self::NumSpaceSteps => "num_space_steps",
            Self::NumTimeSteps => "num_time_steps",
            Self::Pd => "pd",
            Self::Pm => "pm",
            Self::Pu => "pu",
            Self::Vol => "vol",
        }
    }
}

impl std::str::FromStr for DiagKey {
    type Err = ();

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "drift" => Ok(Self::Drift),
            "dt" => Ok(Self::Dt),
            "dx" => Ok(Self::Dx),
            "num_space_steps" => Ok(Self::NumSpaceSteps),
            "num_time_steps" => Ok(Self::NumTimeSteps),
            "pd" => Ok(Self::Pd),
            "pm" => Ok(Self::Pm),
            "pu" => Ok(Self::Pu),
            "vol" => Ok(Self::Vol),
            _ => Err(()),
        }
    }
}

/// Fixed-capacity diagnostics storage used in [`crate::core::PricingResult`].
///
/// Engines emit at most [`Diagnostics::CAPACITY`] scalars per run, so a small
/// inline array avoids a per-pricing heap allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: [Option<(DiagKey, f64)>; 10],
}

impl Diagnostics {
    pub const CAPACITY: usize = 10;

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries[0].is_none()
    }

    /// Inserts a diagnostic value, returning the previous value for the key.
    ///
    /// # Panics
    /// Panics when more than [`Self::CAPACITY`] distinct keys are inserted.
    #[inline]
    pub fn insert(&mut self, key: DiagKey, value: f64) -> Option<f64> {
        for (entry_key, existing) in self.entries.iter_mut().flatten() {
            if *entry_key == key {
                let prev = *existing;
                *existing = value;
                return Some(prev);
            }
        }

        for entry in &mut self.entries {
            if entry.is_none() {
                *entry = Some((key, value));
                return None;
            }
        }

        panic!("diagnostics capacity exceeded ({})", Self::CAPACITY);
    }

    #[inline]
    pub fn get(&self, key: DiagKey) -> Option<f64> {
        self.entries
            .iter()
            .flatten()
            .find_map(|(entry_key, value)| (*entry_key == key).then_some(*value))
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries
            .iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), *value))
    }
}
