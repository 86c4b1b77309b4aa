use derive_deref::{Deref, DerefMut};

/// Remaining life of the settled snow in each column. A column looks snowy while its life is
/// above zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct GroundSnow(pub Vec<u32>);

impl GroundSnow {
    pub fn new(width: u16) -> Self {
        Self(vec![0; width as usize])
    }

    /// Land a flake in `column`. Existing snow with more life is left alone.
    pub fn settle(&mut self, column: usize, life: u32) {
        if let Some(current) = self.get_mut(column) {
            *current = (*current).max(life);
        }
    }

    pub fn decay(&mut self) {
        for life in self.iter_mut() {
            *life = life.saturating_sub(1);
        }
    }

    pub fn is_snowy(&self, column: usize) -> bool {
        self.get(column).is_some_and(|life| *life > 0)
    }
}

impl From<Vec<u32>> for GroundSnow {
    fn from(columns: Vec<u32>) -> Self {
        Self(columns)
    }
}
