/// A 1-D slice through the raster, stored as parallel coordinate/value buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossSection {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl CrossSection {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// `[x, y]` pairs, the shape plot libraries usually take.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(self.ys.iter()).map(|(x, y)| [*x, *y])
    }

    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }
}
