/// Timed bonus states granted by combos and power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuffKind {
    Rainbow,
    Magnet,
    SpeedBoost,
}

impl BuffKind {
    pub const ALL: [BuffKind; 3] = [BuffKind::Rainbow, BuffKind::Magnet, BuffKind::SpeedBoost];

    fn slot(self) -> usize {
        match self {
            BuffKind::Rainbow => 0,
            BuffKind::Magnet => 1,
            BuffKind::SpeedBoost => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuffKind::Rainbow => "RAINBOW MODE",
            BuffKind::Magnet => "MAGNET",
            BuffKind::SpeedBoost => "SPEED BOOST",
        }
    }
}

/// Remaining ticks per buff kind. A buff is active while its countdown is
/// non-zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buffs {
    remaining: [u32; 3],
}

impl Buffs {
    /// Start (or restart) a buff for `ticks` ticks.
    pub fn grant(&mut self, kind: BuffKind, ticks: u32) {
        self.remaining[kind.slot()] = ticks;
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.remaining[kind.slot()] > 0
    }

    pub fn remaining(&self, kind: BuffKind) -> u32 {
        self.remaining[kind.slot()]
    }

    /// One tick of decay. Returns the buffs that expired on this tick.
    pub fn tick(&mut self) -> Vec<BuffKind> {
        let mut expired = Vec::new();
        for kind in BuffKind::ALL {
            let left = &mut self.remaining[kind.slot()];
            if *left > 0 {
                *left -= 1;
                if *left == 0 {
                    expired.push(kind);
                }
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        self.remaining = [0; 3];
    }

    pub fn active(&self) -> impl Iterator<Item = BuffKind> + '_ {
        BuffKind::ALL.into_iter().filter(|k| self.is_active(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_expires_after_granted_ticks() {
        let mut buffs = Buffs::default();
        buffs.grant(BuffKind::Magnet, 2);
        assert!(buffs.is_active(BuffKind::Magnet));
        assert!(buffs.tick().is_empty());
        assert_eq!(buffs.tick(), vec![BuffKind::Magnet]);
        assert!(!buffs.is_active(BuffKind::Magnet));
        assert!(buffs.tick().is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut buffs = Buffs::default();
        buffs.grant(BuffKind::Rainbow, 10);
        buffs.grant(BuffKind::SpeedBoost, 10);
        assert_eq!(buffs.active().count(), 2);
        buffs.clear();
        assert_eq!(buffs.active().count(), 0);
    }
}
