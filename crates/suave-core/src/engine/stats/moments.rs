/// Population moments of a scalar series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub mean: f64,
    /// Population standard deviation (no Bessel correction).
    pub std_dev: f64,
    /// Third standardised moment.
    pub skewness: f64,
    /// Fourth standardised moment, not reduced by 3.
    pub kurtosis: f64,
}

impl Moments {
    /// All zeros for an empty series; skewness and kurtosis are zero when the
    /// series has no spread.
    pub fn of(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self::default();
        }
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        if std_dev == 0.0 {
            return Self {
                mean,
                ..Self::default()
            };
        }

        let (mut m3, mut m4) = (0.0, 0.0);
        for x in data {
            let z = (x - mean) / std_dev;
            let z2 = z * z;
            m3 += z2 * z;
            m4 += z2 * z2;
        }
        Self {
            mean,
            std_dev,
            skewness: m3 / n,
            kurtosis: m4 / n,
        }
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}
