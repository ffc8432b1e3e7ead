//! Pure-data observability ledgers.
//!
//! These structs record *when* (in master-clock PPU cycles) notable timing
//! events happened. They never gate behavior themselves: the PPU and DMA
//! state machines already produce the correct bus-visible effects on their
//! own. They exist so the exact-cycle races described in the VBlank/NMI and
//! OAM/DMC sharing rules are inspectable after the fact.

/// Timestamps around the VBlank flag and the $2002-read race.
#[derive(Debug, Clone, Copy, Default)]
pub struct VBlankLedger {
    /// Cycle VBlank was last set (scanline 241, dot 1).
    pub last_set_cycle: u64,
    /// Cycle VBlank was last cleared (pre-render line, dot 1).
    pub last_clear_cycle: u64,
    /// Cycle $2002 (PPUSTATUS) was last read.
    pub last_read_cycle: u64,
    /// Cycle a read of $2002 raced the VBlank-set dot and suppressed NMI.
    pub last_race_cycle: u64,
}

impl VBlankLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all timestamps to zero (power-on/reset).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_set(&mut self, cycle: u64) {
        self.last_set_cycle = cycle;
    }

    pub fn record_clear(&mut self, cycle: u64) {
        self.last_clear_cycle = cycle;
    }

    pub fn record_read(&mut self, cycle: u64) {
        self.last_read_cycle = cycle;
    }

    pub fn record_race(&mut self, cycle: u64) {
        self.last_race_cycle = cycle;
    }
}

/// Timestamps around OAM DMA / DMC DMA time-sharing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DmaInteractionLedger {
    /// Cycle a DMC fetch last forced OAM DMA to pause.
    pub last_dmc_active_cycle: u64,
    /// Cycle OAM DMA last resumed after a DMC fetch released the bus.
    pub last_dmc_inactive_cycle: u64,
    /// Cycle OAM DMA last paused for a DMC fetch.
    pub oam_pause_cycle: u64,
    /// Cycle OAM DMA last resumed transfer.
    pub oam_resume_cycle: u64,
    /// Set when OAM DMA owes one extra alignment cycle after a DMC fetch
    /// completed mid-transfer, consumed before the next OAM byte transfers.
    pub needs_alignment_after_dmc: bool,
}

impl DmaInteractionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all timestamps and flags (power-on/reset).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_dmc_pause_oam(&mut self, cycle: u64) {
        self.last_dmc_active_cycle = cycle;
        self.oam_pause_cycle = cycle;
        self.needs_alignment_after_dmc = true;
    }

    pub fn record_oam_resume(&mut self, cycle: u64) {
        self.last_dmc_inactive_cycle = cycle;
        self.oam_resume_cycle = cycle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vblank_ledger_records_and_resets() {
        let mut ledger = VBlankLedger::new();
        ledger.record_set(100);
        ledger.record_read(101);
        ledger.record_race(101);
        assert_eq!(ledger.last_set_cycle, 100);
        assert_eq!(ledger.last_race_cycle, 101);
        ledger.reset();
        assert_eq!(ledger.last_set_cycle, 0);
        assert_eq!(ledger.last_race_cycle, 0);
    }

    #[test]
    fn dma_ledger_tracks_pause_and_resume() {
        let mut ledger = DmaInteractionLedger::new();
        ledger.record_dmc_pause_oam(500);
        assert!(ledger.needs_alignment_after_dmc);
        ledger.record_oam_resume(504);
        assert_eq!(ledger.oam_resume_cycle, 504);
        ledger.reset();
        assert!(!ledger.needs_alignment_after_dmc);
    }
}
