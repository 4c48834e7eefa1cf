//! Cartesian Product over Named Domains
//!
//! Odometer-style iterator: the last domain varies fastest, so the sequence
//! is stable for identical domains. A fresh `CartesianProduct::new` over
//! the same domains replays the same sequence.

use serde::{Deserialize, Serialize};

/// A named parameter with its finite, ordered set of candidate values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDomain {
    pub name: String,
    pub values: Vec<String>,
}

impl ParameterDomain {
    pub fn new(name: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Domain with a single fixed value
    pub fn fixed(name: &str, value: &str) -> Self {
        Self::new(name, &[value])
    }
}

/// Iterator over every combination of the given domains
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a> {
    domains: &'a [ParameterDomain],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> CartesianProduct<'a> {
    pub fn new(domains: &'a [ParameterDomain]) -> Self {
        Self {
            domains,
            indices: vec![0; domains.len()],
            done: domains.iter().any(|d| d.values.is_empty()),
        }
    }

    /// Total number of combinations
    pub fn total(&self) -> usize {
        self.domains.iter().map(|d| d.values.len()).product()
    }
}

impl<'a> Iterator for CartesianProduct<'a> {
    type Item = Vec<(&'a str, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self
            .domains
            .iter()
            .zip(&self.indices)
            .map(|(domain, &i)| (domain.name.as_str(), domain.values[i].as_str()))
            .collect();

        // Advance the odometer
        let mut axis = self.domains.len();
        loop {
            if axis == 0 {
                self.done = true;
                break;
            }
            axis -= 1;
            self.indices[axis] += 1;
            if self.indices[axis] < self.domains[axis].values.len() {
                break;
            }
            self.indices[axis] = 0;
        }

        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_axis_varies_fastest() {
        let domains = vec![
            ParameterDomain::new("a", &["1", "2"]),
            ParameterDomain::new("b", &["x", "y", "z"]),
        ];
        let combos: Vec<_> = CartesianProduct::new(&domains).collect();
        assert_eq!(combos.len(), 6);
        assert_eq!(combos[0], vec![("a", "1"), ("b", "x")]);
        assert_eq!(combos[1], vec![("a", "1"), ("b", "y")]);
        assert_eq!(combos[3], vec![("a", "2"), ("b", "x")]);
        assert_eq!(combos[5], vec![("a", "2"), ("b", "z")]);
    }

    #[test]
    fn test_total_matches_iteration() {
        let domains = vec![
            ParameterDomain::new("a", &["1", "2"]),
            ParameterDomain::new("b", &["1", "2"]),
            ParameterDomain::new("c", &["1", "2", "3"]),
        ];
        let product = CartesianProduct::new(&domains);
        assert_eq!(product.total(), 12);
        assert_eq!(product.count(), 12);
    }

    #[test]
    fn test_empty_domain_yields_nothing() {
        let domains = vec![
            ParameterDomain::new("a", &["1"]),
            ParameterDomain { name: "b".to_string(), values: vec![] },
        ];
        assert_eq!(CartesianProduct::new(&domains).count(), 0);
    }

    #[test]
    fn test_no_domains_yields_single_empty_combination() {
        let combos: Vec<_> = CartesianProduct::new(&[]).collect();
        assert_eq!(combos, vec![Vec::<(&str, &str)>::new()]);
    }

    #[test]
    fn test_restart_is_identical() {
        let domains = vec![ParameterDomain::new("a", &["1", "2", "3"])];
        let first: Vec<_> = CartesianProduct::new(&domains).collect();
        let second: Vec<_> = CartesianProduct::new(&domains).collect();
        assert_eq!(first, second);
    }
}
