use chrono::{Days, NaiveDate};
use rand::thread_rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::schema::BusinessRecord;

const SAMPLE_MONTHS: u64 = 12;
const COST_NOISE_STD: f64 = 50_000.0;
const CUSTOMER_NOISE_STD: f64 = 50.0;

const DEPARTMENTS: [&str; 5] = [
    "Sales",
    "Marketing",
    "Engineering",
    "Operations",
    "Customer Success",
];

/// Built-in sample dataset profiles, for demos and for exercising the
/// pipeline without an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleDataset {
    Finance,
    Sales,
    Startup,
    Operations,
}

enum Growth {
    /// Fixed amount added per period.
    Linear(f64),
    /// Period-over-period multiplier.
    Compound(f64),
}

struct Profile {
    base_revenue: f64,
    revenue_variance: f64,
    growth: Growth,
    cost_ratio: f64,
}

impl SampleDataset {
    pub const ALL: [SampleDataset; 4] = [
        SampleDataset::Finance,
        SampleDataset::Sales,
        SampleDataset::Startup,
        SampleDataset::Operations,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Sales => "sales",
            Self::Startup => "startup",
            Self::Operations => "operations",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Finance => "Financial Performance",
            Self::Sales => "Sales Analytics",
            Self::Startup => "Startup Growth",
            Self::Operations => "Operational Efficiency",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Finance => "12 months of revenue, costs, and profit data",
            Self::Sales => "Multi-department sales and customer metrics",
            Self::Startup => "High-growth startup metrics with scaling challenges",
            Self::Operations => "Operations and productivity metrics",
        }
    }

    fn profile(self) -> Profile {
        match self {
            Self::Finance => Profile {
                base_revenue: 500_000.0,
                revenue_variance: 200_000.0,
                growth: Growth::Linear(30_000.0),
                cost_ratio: 0.6,
            },
            Self::Sales => Profile {
                base_revenue: 800_000.0,
                revenue_variance: 300_000.0,
                growth: Growth::Linear(40_000.0),
                cost_ratio: 0.5,
            },
            Self::Startup => Profile {
                base_revenue: 50_000.0,
                revenue_variance: 20_000.0,
                growth: Growth::Compound(1.25),
                cost_ratio: 0.8,
            },
            Self::Operations => Profile {
                base_revenue: 600_000.0,
                revenue_variance: 150_000.0,
                growth: Growth::Linear(25_000.0),
                cost_ratio: 0.75,
            },
        }
    }

    /// Generates 12 monthly records starting at `start`, with Gaussian noise
    /// on revenue, costs and customers. The caller supplies the start date;
    /// the generator never reads the clock.
    pub fn generate(self, start: NaiveDate) -> Vec<BusinessRecord> {
        let profile = self.profile();
        let mut rng = thread_rng();
        let revenue_noise = Normal::new(0.0, profile.revenue_variance).unwrap();
        let cost_noise = Normal::new(0.0, COST_NOISE_STD).unwrap();
        let customer_noise = Normal::new(0.0, CUSTOMER_NOISE_STD).unwrap();

        (0..SAMPLE_MONTHS)
            .map(|i| {
                let trend = match profile.growth {
                    Growth::Linear(amount) => profile.base_revenue + amount * i as f64,
                    Growth::Compound(rate) => profile.base_revenue * rate.powi(i as i32),
                };
                let revenue = trend + revenue_noise.sample(&mut rng);
                let costs = revenue * profile.cost_ratio + cost_noise.sample(&mut rng);
                let customers =
                    1000.0 + 100.0 * i as f64 + customer_noise.sample(&mut rng);

                BusinessRecord {
                    date: start + Days::new(30 * i),
                    revenue: revenue.max(0.0),
                    costs: costs.max(0.0),
                    customers: Some(customers.max(0.0).round() as u64),
                    department: Some(DEPARTMENTS[i as usize % DEPARTMENTS.len()].to_string()),
                }
            })
            .collect()
    }
}
