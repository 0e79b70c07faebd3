use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub type SpeciesId = u64;
pub type GenomeId = u64;

/// Per-generation fitness history of an evolutionary run.
pub trait FitnessHistory {
    /// Fitness of the most fit genome of each generation.
    fn best_fitness(&self) -> Vec<f64>;
    fn fitness_mean(&self) -> Vec<f64>;
    fn fitness_stdev(&self) -> Vec<f64>;
}

/// Per-generation species sizes.
///
/// Rows are generations, columns are species ids `1..=max_id`; a species
/// absent from a generation has size 0 there.
pub trait SpeciesHistory {
    fn species_sizes(&self) -> Vec<Vec<usize>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeSummary {
    pub key: GenomeId,
    pub fitness: f64,
}

/// Statistics recorded by a reporter over the course of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub most_fit_genomes: Vec<GenomeSummary>,
    /// species id -> genome id -> fitness, one map per generation.
    #[serde(default)]
    pub generation_statistics: Vec<BTreeMap<SpeciesId, BTreeMap<GenomeId, f64>>>,
}

impl Statistics {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn generations(&self) -> usize {
        self.generation_statistics.len()
    }

    fn per_generation(&self, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
        self.generation_statistics
            .iter()
            .map(|species| {
                let scores: Vec<f64> = species
                    .values()
                    .flat_map(|members| members.values().copied())
                    .collect();
                f(&scores)
            })
            .collect()
    }
}

impl FitnessHistory for Statistics {
    fn best_fitness(&self) -> Vec<f64> {
        self.most_fit_genomes.iter().map(|g| g.fitness).collect()
    }

    fn fitness_mean(&self) -> Vec<f64> {
        self.per_generation(mean)
    }

    fn fitness_stdev(&self) -> Vec<f64> {
        self.per_generation(stdev)
    }
}

impl SpeciesHistory for Statistics {
    fn species_sizes(&self) -> Vec<Vec<usize>> {
        let all_species: BTreeSet<SpeciesId> = self
            .generation_statistics
            .iter()
            .flat_map(|g| g.keys().copied())
            .collect();
        let max_species = all_species.last().copied().unwrap_or(0);

        self.generation_statistics
            .iter()
            .map(|g| {
                (1..=max_species)
                    .map(|sid| g.get(&sid).map_or(0, BTreeMap::len))
                    .collect()
            })
            .collect()
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn stdev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(
        entries: &[(SpeciesId, &[(GenomeId, f64)])],
    ) -> BTreeMap<SpeciesId, BTreeMap<GenomeId, f64>> {
        entries
            .iter()
            .map(|(sid, members)| (*sid, members.iter().copied().collect()))
            .collect()
    }

    fn sample() -> Statistics {
        Statistics {
            most_fit_genomes: vec![
                GenomeSummary { key: 3, fitness: 3.0 },
                GenomeSummary { key: 7, fitness: 5.0 },
            ],
            generation_statistics: vec![
                generation(&[(1, &[(1, 1.0), (2, 2.0)]), (2, &[(3, 3.0)])]),
                generation(&[(2, &[(4, 5.0), (5, 1.0)]), (4, &[(7, 3.0)])]),
            ],
        }
    }

    #[test]
    fn mean_and_stdev_span_all_species() {
        let stats = sample();
        assert_eq!(stats.fitness_mean(), vec![2.0, 3.0]);
        let sd = stats.fitness_stdev();
        assert!((sd[0] - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((sd[1] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(stats.best_fitness(), vec![3.0, 5.0]);
    }

    #[test]
    fn species_sizes_fill_missing_ids_with_zero() {
        let sizes = sample().species_sizes();
        assert_eq!(sizes, vec![vec![2, 1, 0, 0], vec![0, 2, 0, 1]]);
    }

    #[test]
    fn empty_generation_has_zero_mean() {
        let stats = Statistics {
            most_fit_genomes: Vec::new(),
            generation_statistics: vec![BTreeMap::new()],
        };
        assert_eq!(stats.fitness_mean(), vec![0.0]);
        assert_eq!(stats.fitness_stdev(), vec![0.0]);
        assert_eq!(stats.species_sizes(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn loads_json_with_string_keys() {
        let json = r#"{
            "most_fit_genomes": [{"key": 1, "fitness": 0.5}],
            "generation_statistics": [{"1": {"1": 0.5, "2": 0.25}}]
        }"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.generations(), 1);
        assert_eq!(stats.species_sizes(), vec![vec![2]]);
    }
}
