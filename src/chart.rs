use crate::config::ChartWindow;
use crate::data::model::FilteredTable;

/// One bar: planet name and distance in parsecs, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBar {
    pub label: String,
    pub distance: Option<f64>,
}

/// Bars for a contiguous window of the filtered table, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceChart {
    pub bars: Vec<DistanceBar>,
}

impl DistanceChart {
    /// Take the rows in `window` (zero-based, end-exclusive). A window past
    /// the end of the table yields fewer bars or none.
    pub fn from_table(table: &FilteredTable, window: ChartWindow) -> Self {
        let range = window.clamp(table.len());
        let bars: Vec<DistanceBar> = table.rows()[range]
            .iter()
            .map(|row| DistanceBar {
                label: row.record.pl_name.clone().unwrap_or_default(),
                distance: row.record.sy_dist,
            })
            .collect();

        if bars.is_empty() {
            log::warn!(
                "Chart window {}..{} is empty for a table of {} rows",
                window.start,
                window.end,
                table.len()
            );
        }
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest known distance, used to size the y axis.
    pub fn max_distance(&self) -> Option<f64> {
        self.bars.iter().filter_map(|b| b.distance).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{NumericColumn, PlanetRecord};

    fn table(n: usize) -> FilteredTable {
        FilteredTable::reindexed(
            (0..n)
                .map(|i| PlanetRecord::named(format!("p{i}")).with(NumericColumn::Distance, i as f64 * 10.0))
                .collect(),
        )
    }

    fn labels(chart: &DistanceChart) -> Vec<&str> {
        chart.bars.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn default_window_takes_rows_eight_to_thirteen() {
        let chart = DistanceChart::from_table(&table(24), ChartWindow::default());
        assert_eq!(labels(&chart), vec!["p7", "p8", "p9", "p10", "p11", "p12"]);
        assert_eq!(chart.bars[0].distance, Some(70.0));
    }

    #[test]
    fn short_table_truncates() {
        let chart = DistanceChart::from_table(&table(10), ChartWindow::default());
        assert_eq!(labels(&chart), vec!["p7", "p8", "p9"]);
    }

    #[test]
    fn tiny_table_gives_empty_chart() {
        assert!(DistanceChart::from_table(&table(7), ChartWindow::default()).is_empty());
        assert!(DistanceChart::from_table(&table(0), ChartWindow::default()).is_empty());
    }

    #[test]
    fn missing_distance_keeps_its_slot() {
        let t = FilteredTable::reindexed(vec![
            PlanetRecord::named("a").with(NumericColumn::Distance, 5.0),
            PlanetRecord::named("b"),
        ]);
        let chart = DistanceChart::from_table(&t, ChartWindow::new(0, 2));
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.bars[1].distance, None);
        assert_eq!(chart.max_distance(), Some(5.0));
    }
}
