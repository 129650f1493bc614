use std::collections::HashSet;
use std::convert::TryFrom;

use rand::distributions::WeightedIndex;
use serde::Serialize;

use crate::error::GenError;

/// Allowed distance between the sum of the weights and 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-8;

/// A single activity that can be drawn for a day
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    /// Whether the activity counts as physical exertion
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// A named group of activities. The `id` is the key of the category in the composite document,
/// so it is not part of the serialized body.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub active: bool,
    pub description: String,
    pub activity_names: Vec<String>,
}

/// Probabilities aligned with the activities of a [Catalog](crate::catalog::Catalog).
/// Always non-empty, non-negative and summing to 1.
#[derive(Debug, Clone)]
pub struct Weights {
    values: Vec<f64>,
    distribution: WeightedIndex<f64>,
}

/// The fixed set of activities available for sampling, with their categories and weights
#[derive(Debug, Clone)]
pub struct Catalog {
    activities: Vec<Activity>,
    categories: Vec<Category>,
    weights: Weights,
}

impl Activity {
    #[must_use]
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Activity {
            name: name.into(),
            active,
            category_id: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

impl Category {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        active: bool,
        description: impl Into<String>,
        activity_names: &[&str],
    ) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            active,
            description: description.into(),
            activity_names: activity_names.iter().map(|&n| n.to_owned()).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, activity_name: &str) -> bool {
        self.activity_names.iter().any(|n| n == activity_name)
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = GenError;
    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.is_empty() {
            return Err(GenError::EmptyCatalog);
        }
        if let Some((index, &weight)) = values
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(GenError::InvalidWeight { index, weight });
        }

        let sum: f64 = values.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GenError::WeightsNotNormalized { sum });
        }

        let distribution = WeightedIndex::new(&values)?;
        Ok(Weights {
            values,
            distribution,
        })
    }
}

impl TryFrom<&[f64]> for Weights {
    type Error = GenError;
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Weights::try_from(values.to_vec())
    }
}

impl Weights {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn distribution(&self) -> &WeightedIndex<f64> {
        &self.distribution
    }
}

impl Catalog {
    /// # Errors
    /// Errors when the catalog is inconsistent:
    /// 1. `activities` is empty or its length differs from `weights`
    /// 2. `weights` are negative, not finite or do not sum to 1
    /// 3. a category id is declared twice
    /// 4. an activity refers to a category that is missing or does not list it
    pub fn new(
        activities: Vec<Activity>,
        categories: Vec<Category>,
        weights: Vec<f64>,
    ) -> Result<Self, GenError> {
        if activities.is_empty() {
            return Err(GenError::EmptyCatalog);
        }
        if activities.len() != weights.len() {
            return Err(GenError::WeightCountMismatch {
                expected: activities.len(),
                actual: weights.len(),
            });
        }
        let weights = Weights::try_from(weights)?;

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                return Err(GenError::DuplicateCategory(category.id.clone()));
            }
        }

        for activity in &activities {
            let Some(category_id) = &activity.category_id else {
                continue;
            };
            let category = categories
                .iter()
                .find(|c| &c.id == category_id)
                .ok_or_else(|| GenError::UnknownCategory {
                    activity: activity.name.clone(),
                    category_id: category_id.clone(),
                })?;
            if !category.contains(&activity.name) {
                return Err(GenError::UnlistedActivity {
                    activity: activity.name.clone(),
                    category_id: category_id.clone(),
                });
            }
        }

        Ok(Catalog {
            activities,
            categories,
            weights,
        })
    }

    /// The flat list of sports used by the first version of the app. Rest days are not active.
    ///
    /// # Errors
    /// Never in practice, the built-in table is validated like any other catalog
    pub fn classic() -> Result<Self, GenError> {
        let activities = [
            ("nothing", false),
            ("sick", false),
            ("basketball", true),
            ("gym", true),
            ("running", true),
            ("badminton", true),
            ("squash", true),
        ]
        .into_iter()
        .map(|(name, active)| Activity::new(name, active))
        .collect();

        Catalog::new(
            activities,
            Vec::new(),
            vec![0.3, 0.05, 0.15, 0.1, 0.2, 0.13, 0.07],
        )
    }

    /// The default categories of the app with the activities drawn from them.
    /// Each activity inherits the `active` flag of its category.
    ///
    /// # Errors
    /// Never in practice, the built-in table is validated like any other catalog
    pub fn categorized() -> Result<Self, GenError> {
        let categories = vec![
            Category::new(
                "cat-sports",
                "Running",
                true,
                "Running and jogging activities",
                &["Running", "Trail Running"],
            ),
            Category::new(
                "cat-cycling",
                "Cycling",
                true,
                "Cycling activities",
                &["Cycling", "Mountain Biking"],
            ),
            Category::new(
                "cat-gym",
                "Gym & Strength",
                true,
                "Gym and strength training",
                &["Gym", "Weight Training"],
            ),
            Category::new(
                "cat-team",
                "Team Sports",
                true,
                "Team sports",
                &["Basketball", "Badminton", "Squash"],
            ),
            Category::new(
                "cat-rest",
                "Rest & Recovery",
                false,
                "Rest days",
                &["Nothing", "Sick"],
            ),
        ];

        let activities = [
            ("Nothing", "cat-rest"),
            ("Sick", "cat-rest"),
            ("Basketball", "cat-team"),
            ("Gym", "cat-gym"),
            ("Running", "cat-sports"),
            ("Badminton", "cat-team"),
            ("Squash", "cat-team"),
            ("Cycling", "cat-cycling"),
            ("Mountain Biking", "cat-cycling"),
            ("Trail Running", "cat-sports"),
            ("Weight Training", "cat-gym"),
        ]
        .into_iter()
        .map(|(name, category_id)| {
            let active = categories
                .iter()
                .find(|c| c.id == category_id)
                .map_or(false, |c| c.active);
            Activity::new(name, active).with_category(category_id)
        })
        .collect();

        Catalog::new(
            activities,
            categories,
            vec![0.2, 0.03, 0.1, 0.08, 0.15, 0.08, 0.05, 0.1, 0.05, 0.06, 0.1],
        )
    }

    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    #[must_use]
    pub fn activity(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, activity: &Activity) -> bool {
        self.activities.iter().any(|a| a == activity)
    }
}
