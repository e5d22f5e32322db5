use crate::analyzers::types::PriceHistogram;
use crate::analyzers::utility::min_max;
use crate::table::Table;

/// Number of price buckets shown on the dashboard.
pub const PRICE_BUCKETS: usize = 50;

impl PriceHistogram {
    /// Buckets `prices` into `buckets` equal-width bins spanning their range.
    ///
    /// The maximum lands in the last bin. If every price is equal, a single
    /// unit-wide bin centred on that price holds them all.
    pub fn from_prices(prices: &[f64], buckets: usize) -> Self {
        let Some((lo, hi)) = min_max(prices) else {
            return Self::default();
        };
        if buckets == 0 {
            return Self::default();
        }

        if lo == hi {
            return Self {
                edges: vec![lo - 0.5, lo + 0.5],
                counts: vec![prices.len()],
            };
        }

        let width = (hi - lo) / buckets as f64;
        let edges = (0..=buckets)
            .map(|i| if i == buckets { hi } else { lo + width * i as f64 })
            .collect();
        let mut counts = vec![0usize; buckets];
        for &price in prices {
            let idx = (((price - lo) / width) as usize).min(buckets - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    /// Histogram of every valid price in a cleaned table.
    pub fn from_table(table: &Table, buckets: usize) -> anyhow::Result<Self> {
        let prices: Vec<f64> = table.flights()?.filter_map(|f| f.price).collect();
        Ok(Self::from_prices(&prices, buckets))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Midpoint of each bucket, used as the bar position.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn bucket_width(&self) -> Option<f64> {
        self.edges.get(1).zip(self.edges.first()).map(|(b, a)| b - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::clean;
    use crate::loader::parse_table;

    #[test]
    fn test_empty_prices() {
        let hist = PriceHistogram::from_prices(&[], PRICE_BUCKETS);
        assert!(hist.counts.is_empty());
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_fixed_bucket_count() {
        let prices: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let hist = PriceHistogram::from_prices(&prices, PRICE_BUCKETS);

        assert_eq!(hist.counts.len(), PRICE_BUCKETS);
        assert_eq!(hist.edges.len(), PRICE_BUCKETS + 1);
        assert_eq!(hist.total(), 1000);
        assert_eq!(hist.edges[0], 0.0);
        assert_eq!(hist.edges[PRICE_BUCKETS], 999.0);
    }

    #[test]
    fn test_max_falls_in_last_bucket() {
        let hist = PriceHistogram::from_prices(&[0.0, 10.0], 5);
        assert_eq!(hist.counts, vec![1, 0, 0, 0, 1]);
        assert_eq!(hist.bucket_width(), Some(2.0));
        assert_eq!(hist.centers()[0], 1.0);
    }

    #[test]
    fn test_single_value() {
        let hist = PriceHistogram::from_prices(&[42.0, 42.0, 42.0], PRICE_BUCKETS);
        assert_eq!(hist.counts, vec![3]);
        assert_eq!(hist.edges, vec![41.5, 42.5]);
    }

    #[test]
    fn test_missing_prices_not_counted() {
        let table = clean(
            parse_table("from,to,price\nA,B,100\nA,B,N/A\nA,C,200\n".as_bytes()).unwrap(),
        )
        .unwrap();
        let hist = PriceHistogram::from_table(&table, PRICE_BUCKETS).unwrap();
        assert_eq!(hist.total(), 2);
    }
}
