#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    // unix seconds, session open
    pub timestamp: i64,
    pub close: f64,
}

/// Daily closes for one ticker, oldest first. Built fresh for every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}
