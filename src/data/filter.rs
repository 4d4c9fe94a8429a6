use std::collections::HashSet;

use super::model::{Catalog, FilteredTable, PlanetRecord};

// ---------------------------------------------------------------------------
// Name filter: keep catalog rows whose planet name is a target
// ---------------------------------------------------------------------------

/// Return the catalog rows whose `pl_name` is one of `targets`, re-indexed
/// `1..=N` in catalog order.
///
/// A row passes when:
/// * its name is exactly (case-sensitive, untrimmed) one of the targets
///
/// Rows without a name never pass. Targets missing from the catalog are
/// simply not represented.
pub fn filter_by_names(catalog: &Catalog, targets: &[String]) -> FilteredTable {
    filter_records(&catalog.records, targets)
}

/// Same as [`filter_by_names`] over an arbitrary row slice, so a filtered
/// table can be filtered again.
pub fn filter_records<'a, I>(records: I, targets: &[String]) -> FilteredTable
where
    I: IntoIterator<Item = &'a PlanetRecord>,
{
    let wanted: HashSet<&str> = targets.iter().map(String::as_str).collect();

    let matched: Vec<PlanetRecord> = records
        .into_iter()
        .filter(|rec| {
            rec.pl_name
                .as_deref()
                .is_some_and(|name| wanted.contains(name))
        })
        .cloned()
        .collect();

    if log::log_enabled!(log::Level::Debug) {
        let found: HashSet<&str> = matched.iter().filter_map(|r| r.pl_name.as_deref()).collect();
        for name in wanted.difference(&found) {
            log::debug!("Target '{name}' not found in catalog");
        }
    }

    log::info!(
        "{} catalog rows match {} target names",
        matched.len(),
        wanted.len()
    );
    FilteredTable::reindexed(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::NumericColumn;

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| PlanetRecord::named(*n).with(NumericColumn::Distance, i as f64))
                .collect(),
        )
    }

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn keeps_matching_rows_in_catalog_order() {
        let cat = catalog(&["a", "b", "c", "d", "e"]);
        let table = filter_by_names(&cat, &targets(&["d", "b"]));
        let names: Vec<_> = table.records().map(|r| r.pl_name.clone().unwrap()).collect();
        assert_eq!(names, vec!["b", "d"]);
        // Values are untouched.
        assert_eq!(table.rows()[1].record.sy_dist, Some(3.0));
    }

    #[test]
    fn sound_and_complete() {
        let cat = catalog(&["a", "b", "a", "c", "d", "b"]);
        let tgt = targets(&["a", "b", "zz"]);
        let table = filter_by_names(&cat, &tgt);

        for rec in table.records() {
            assert!(tgt.contains(rec.pl_name.as_ref().unwrap()));
        }
        let expected = cat
            .records
            .iter()
            .filter(|r| tgt.contains(r.pl_name.as_ref().unwrap()))
            .count();
        assert_eq!(table.len(), expected);
    }

    #[test]
    fn index_is_contiguous_from_one() {
        let cat = catalog(&["x", "a", "y", "y", "b", "z", "c"]);
        let table = filter_by_names(&cat, &targets(&["a", "b", "c"]));
        let idx: Vec<usize> = table.rows().iter().map(|r| r.index).collect();
        assert_eq!(idx, (1..=table.len()).collect::<Vec<_>>());
    }

    #[test]
    fn filtering_is_idempotent() {
        let cat = catalog(&["a", "b", "c", "d", "e", "f"]);
        let tgt = targets(&["f", "a", "c", "q"]);
        let once = filter_by_names(&cat, &tgt);
        let twice = filter_records(once.records(), &tgt);
        assert_eq!(once, twice);
    }

    #[test]
    fn thirty_rows_twenty_four_targets() {
        let names: Vec<String> = (0..30).map(|i| format!("Kepler-{} b", 100 + i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let cat = catalog(&refs);
        // Spread the targets over the catalog, not just the prefix.
        let tgt: Vec<String> = names.iter().skip(3).take(24).cloned().collect();
        let table = filter_by_names(&cat, &tgt);
        assert_eq!(table.len(), 24);
        assert_eq!(table.rows().first().unwrap().index, 1);
        assert_eq!(table.rows().last().unwrap().index, 24);
    }

    #[test]
    fn match_is_exact() {
        let cat = catalog(&["Kepler-442 b", "Kepler-62 f", "TRAPPIST-1 e"]);
        let table = filter_by_names(&cat, &targets(&["Kepler-442 b ", "kepler-62 f", "TRAPPIST-1"]));
        assert!(table.is_empty());
    }

    #[test]
    fn unnamed_rows_never_match() {
        let mut cat = catalog(&["a"]);
        cat.records.push(PlanetRecord::default());
        let table = filter_by_names(&cat, &targets(&["a", ""]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_inputs() {
        assert!(filter_by_names(&Catalog::default(), &targets(&["a"])).is_empty());
        assert!(filter_by_names(&catalog(&["a"]), &[]).is_empty());
    }
}
