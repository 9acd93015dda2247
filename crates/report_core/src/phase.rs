/// One step of the cosmetic progress display shown while a report generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPhase {
    pub message: &'static str,
    pub duration_ms: u64,
}

pub const GENERATION_PHASES: &[GenerationPhase] = &[
    GenerationPhase { message: "Gathering market data...", duration_ms: 3_000 },
    GenerationPhase { message: "Analyzing company profiles...", duration_ms: 4_000 },
    GenerationPhase { message: "Reviewing funding activity...", duration_ms: 4_000 },
    GenerationPhase { message: "Evaluating competitive landscape...", duration_ms: 5_000 },
    GenerationPhase { message: "Drafting report sections...", duration_ms: 8_000 },
    GenerationPhase { message: "Formatting final report...", duration_ms: 6_000 },
];

/// The bar stays below this until the real result arrives.
pub const MAX_PERCENT_BEFORE_DONE: u8 = 95;

/// Percentage for a phase index, capped below completion.
pub fn phase_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let raw = (index.saturating_add(1).min(total) * 100) / total;
    raw.min(usize::from(MAX_PERCENT_BEFORE_DONE)) as u8
}

/// Phase index of the in-flight generation. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseProgress {
    index: usize,
}

impl PhaseProgress {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Moves to `index` if it is ahead of the current phase and exists.
    pub fn advance_to(&mut self, index: usize) -> bool {
        if index <= self.index || index >= GENERATION_PHASES.len() {
            return false;
        }
        self.index = index;
        true
    }

    pub fn phase(&self) -> &'static GenerationPhase {
        &GENERATION_PHASES[self.index.min(GENERATION_PHASES.len() - 1)]
    }

    pub fn percent(&self) -> u8 {
        phase_percent(self.index, GENERATION_PHASES.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_never_reaches_completion() {
        let total = GENERATION_PHASES.len();
        for index in 0..total + 2 {
            assert!(phase_percent(index, total) <= MAX_PERCENT_BEFORE_DONE);
        }
        assert_eq!(phase_percent(total - 1, total), MAX_PERCENT_BEFORE_DONE);
        assert_eq!(phase_percent(0, 4), 25);
        assert_eq!(phase_percent(1, 4), 50);
        assert_eq!(phase_percent(0, 0), 0);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut progress = PhaseProgress::default();
        assert!(progress.advance_to(2));
        assert!(!progress.advance_to(1));
        assert!(!progress.advance_to(2));
        assert_eq!(progress.index(), 2);
        assert!(!progress.advance_to(GENERATION_PHASES.len()));
        progress.reset();
        assert_eq!(progress.index(), 0);
        assert_eq!(progress.phase().message, GENERATION_PHASES[0].message);
    }
}
