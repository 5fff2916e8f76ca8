//! The viscometry pipeline: raw sinking times in, Reynolds numbers out.

pub mod derived;
pub mod error_model;
pub mod kinematics;
pub mod propagation;
pub mod stats;
pub mod viscosity;

use serde::Serialize;

use crate::config::Apparatus;
use crate::error::Result;
use crate::model::{MeasurementTable, Quantity};
use crate::parser::Dataset;

use self::stats::Aggregator;

/// Stage labels used in failure diagnostics.
///
/// Only stages with a failure mode are named; the error-range stages
/// evaluate the same formulas as their value stages and fail under the
/// value stage's label.
pub mod stage {
    pub const MEAN_TIMES: &str = "mean sinking times";
    pub const MEAN_TIME_ERRORS: &str = "mean sinking time error ranges";
    pub const VELOCITIES: &str = "velocities";
    pub const MEAN_VELOCITIES: &str = "mean velocities";
    pub const MEAN_VELOCITY_ERRORS: &str = "mean velocity error ranges";
    pub const DYNAMIC_VISCOSITY: &str = "dynamic viscosity";
    pub const LADENBURG_VISCOSITY: &str = "Ladenburg dynamic viscosity";
    pub const MEAN_DYNAMIC_VISCOSITY: &str = "mean dynamic viscosity";
    pub const MEAN_LADENBURG_VISCOSITY: &str = "mean Ladenburg dynamic viscosity";
    pub const KINEMATIC_VISCOSITY: &str = "kinematic viscosity";
    pub const REYNOLDS: &str = "Reynolds number";
}

/// Every stage output of one run, in pipeline order.
///
/// Per-configuration results pair the central value with its uncertainty;
/// the two per-trial tables have no per-trial uncertainties.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Stopwatch error per raw timing (trials × configurations).
    pub time_errors: MeasurementTable,
    /// Mean sinking time ± its standard error, per configuration.
    pub mean_times: Vec<Quantity>,
    /// Per-trial velocities (trials × configurations).
    pub velocities: MeasurementTable,
    /// Mean velocity ± first-order error, per configuration.
    pub mean_velocities: Vec<Quantity>,
    /// Stokes viscosity ± worst-case range, per configuration.
    pub dynamic_viscosity: Vec<Quantity>,
    /// Ladenburg-corrected viscosity ± worst-case range, per configuration.
    pub ladenburg_viscosity: Vec<Quantity>,
    /// Cross-configuration mean ± SEM of the Stokes viscosities.
    pub mean_dynamic_viscosity: Quantity,
    /// Cross-configuration mean ± SEM of the Ladenburg viscosities.
    pub mean_ladenburg_viscosity: Quantity,
    /// Kinematic viscosity ± worst-case range, one per run.
    pub kinematic_viscosity: Quantity,
    /// Reynolds number ± worst-case range, per configuration.
    pub reynolds: Vec<Quantity>,
}

impl Analysis {
    pub fn configuration_count(&self) -> usize {
        self.mean_times.len()
    }

    pub fn trial_count(&self) -> usize {
        self.velocities.row_count()
    }
}

/// Runs the whole derivation chain over one dataset.
pub struct Pipeline {
    apparatus: Apparatus,
}

impl Pipeline {
    pub fn new(apparatus: Apparatus) -> Self {
        Self { apparatus }
    }

    /// Executes every stage in order, failing fast on the first error.
    pub fn run(&self, data: &Dataset) -> Result<Analysis> {
        let apparatus = &self.apparatus;
        let times = data.sinking_times();
        let configurations = data.configuration_count();

        // Stopwatch errors per trial, then the per-configuration mean
        // sinking times and their standard errors.
        let time_errors = error_model::time_errors(times);
        let mean_time_values = Aggregator::new(stage::MEAN_TIMES).column_means(times)?;
        let mean_time_errors =
            Aggregator::new(stage::MEAN_TIME_ERRORS).column_standard_errors(&time_errors)?;

        // Velocities: per trial, per configuration mean, and the one
        // first-order error combination in the pipeline.
        let velocities = kinematics::velocities(times, apparatus.cylinder_length.value)?;
        let mean_velocity_values =
            kinematics::mean_velocities(&mean_time_values, apparatus.cylinder_length.value)?;
        let mut mean_velocity_errors = Vec::with_capacity(configurations);
        for column in 0..configurations {
            mean_velocity_errors.push(kinematics::mean_velocity_error(
                apparatus.cylinder_length.error,
                mean_time_values[column],
                mean_time_errors[column],
                column,
            )?);
        }

        // Dynamic viscosity, plain and Ladenburg-corrected.
        let mut dynamic_values = Vec::with_capacity(configurations);
        let mut ladenburg_values = Vec::with_capacity(configurations);
        for column in 0..configurations {
            dynamic_values.push(viscosity::stokes(
                column,
                data.globule_diameters()[column],
                apparatus.gravity.value,
                data.globule_densities()[column],
                apparatus.fluid_density.value,
                mean_velocity_values[column],
            )?);
            ladenburg_values.push(viscosity::ladenburg(
                column,
                data.globule_diameters()[column],
                apparatus.cylinder_diameter.value,
                apparatus.gravity.value,
                data.globule_densities()[column],
                apparatus.fluid_density.value,
                mean_velocity_values[column],
            )?);
        }

        // Worst-case ranges for both viscosities, every input pushed by
        // its own uncertainty.
        let mut dynamic_errors = Vec::with_capacity(configurations);
        let mut ladenburg_errors = Vec::with_capacity(configurations);
        for column in 0..configurations {
            let diameter = Quantity::new(
                data.globule_diameters()[column],
                apparatus.globule_diameter_error,
            );
            let density = Quantity::new(
                data.globule_densities()[column],
                data.globule_density_errors()[column],
            );
            let velocity =
                Quantity::new(mean_velocity_values[column], mean_velocity_errors[column]);
            dynamic_errors.push(propagation::worst_case_range(|e| {
                viscosity::stokes(
                    column,
                    diameter.at(e),
                    apparatus.gravity.at(e),
                    density.at(e),
                    apparatus.fluid_density.at(e),
                    velocity.at(e),
                )
            })?);
            ladenburg_errors.push(propagation::worst_case_range(|e| {
                viscosity::ladenburg(
                    column,
                    diameter.at(e),
                    apparatus.cylinder_diameter.at(e),
                    apparatus.gravity.at(e),
                    density.at(e),
                    apparatus.fluid_density.at(e),
                    velocity.at(e),
                )
            })?);
        }

        // Cross-configuration means of the two viscosities, with the
        // doubly-normalized SEM.
        let dynamic_agg = Aggregator::new(stage::MEAN_DYNAMIC_VISCOSITY);
        let mean_dynamic_value = dynamic_agg.mean(0, &dynamic_values)?;
        let mean_dynamic = Quantity::new(
            mean_dynamic_value,
            dynamic_agg.sem(0, &dynamic_values, mean_dynamic_value)?,
        );
        let ladenburg_agg = Aggregator::new(stage::MEAN_LADENBURG_VISCOSITY);
        let mean_ladenburg_value = ladenburg_agg.mean(0, &ladenburg_values)?;
        let mean_ladenburg = Quantity::new(
            mean_ladenburg_value,
            ladenburg_agg.sem(0, &ladenburg_values, mean_ladenburg_value)?,
        );

        // Kinematic viscosity from the mean Stokes viscosity.
        let kinematic = Quantity::new(
            derived::kinematic_viscosity(mean_dynamic.value, apparatus.fluid_density.value)?,
            propagation::worst_case_range(|e| {
                derived::kinematic_viscosity(mean_dynamic.at(e), apparatus.fluid_density.at(e))
            })?,
        );

        // Reynolds number per configuration.
        let mut reynolds = Vec::with_capacity(configurations);
        for column in 0..configurations {
            let value = derived::reynolds_number(
                column,
                kinematic.value,
                data.globule_diameters()[column],
                apparatus.fluid_density.value,
                dynamic_values[column],
            )?;
            let diameter = Quantity::new(
                data.globule_diameters()[column],
                apparatus.globule_diameter_error,
            );
            let viscosity = Quantity::new(dynamic_values[column], dynamic_errors[column]);
            let error = propagation::worst_case_range(|e| {
                derived::reynolds_number(
                    column,
                    kinematic.at(e),
                    diameter.at(e),
                    apparatus.fluid_density.at(e),
                    viscosity.at(e),
                )
            })?;
            reynolds.push(Quantity::new(value, error));
        }

        Ok(Analysis {
            time_errors,
            mean_times: paired(mean_time_values, mean_time_errors),
            velocities,
            mean_velocities: paired(mean_velocity_values, mean_velocity_errors),
            dynamic_viscosity: paired(dynamic_values, dynamic_errors),
            ladenburg_viscosity: paired(ladenburg_values, ladenburg_errors),
            mean_dynamic_viscosity: mean_dynamic,
            mean_ladenburg_viscosity: mean_ladenburg,
            kinematic_viscosity: kinematic,
            reynolds,
        })
    }
}

/// Convenience wrapper over [`Pipeline`].
pub fn analyze(data: &Dataset, apparatus: &Apparatus) -> Result<Analysis> {
    Pipeline::new(apparatus.clone()).run(data)
}

fn paired(values: Vec<f64>, errors: Vec<f64>) -> Vec<Quantity> {
    values
        .into_iter()
        .zip(errors)
        .map(|(value, error)| Quantity::new(value, error))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn fixture() -> Dataset {
        Dataset::new(
            MeasurementTable::from_rows(vec![vec![10.0, 8.0], vec![12.0, 9.0]]).unwrap(),
            vec![0.002, 0.0025],
            vec![2500.0, 2500.0],
            vec![10.0, 10.0],
        )
        .unwrap()
    }

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= expected.abs() * 1e-12 + 1e-15
    }

    #[test]
    fn test_full_chain_against_hand_computed_values() {
        let analysis = analyze(&fixture(), &Apparatus::default()).unwrap();

        assert_eq!(analysis.configuration_count(), 2);
        assert_eq!(analysis.trial_count(), 2);

        assert_eq!(analysis.time_errors.rows()[0], vec![0.015, 0.014]);
        assert_eq!(analysis.time_errors.rows()[1], vec![0.016, 0.0145]);

        assert!(close(analysis.mean_times[0].value, 11.0));
        assert!(close(analysis.mean_times[1].value, 8.5));
        assert!(close(analysis.mean_times[0].error, 0.0005));
        assert!(close(analysis.mean_times[1].error, 0.00025));

        assert!(close(analysis.velocities.rows()[0][0], 0.02));
        assert!(close(analysis.velocities.rows()[1][1], 0.022222222222222223));

        assert!(close(analysis.mean_velocities[0].value, 0.018181818181818184));
        assert!(close(analysis.mean_velocities[0].error, 4.564198767432753e-5));
        assert!(close(analysis.mean_velocities[1].value, 0.023529411764705882));
        assert!(close(analysis.mean_velocities[1].error, 5.892521233884568e-5));

        assert!(close(analysis.dynamic_viscosity[0].value, 0.18409058861111108));
        assert!(close(analysis.dynamic_viscosity[1].value, 0.22226846636284728));
        assert!(close(analysis.dynamic_viscosity[0].error, 0.0015995276235588607));
        assert!(close(analysis.dynamic_viscosity[1].error, 0.0017103104680430276));

        assert!(close(analysis.ladenburg_viscosity[0].value, 0.17266990216847197));
        assert!(close(analysis.ladenburg_viscosity[1].value, 0.20529523802241165));
        assert!(close(analysis.ladenburg_viscosity[0].error, 0.0014743581941612932));
        assert!(close(analysis.ladenburg_viscosity[1].error, 0.0015495849380862403));

        assert!(close(analysis.mean_dynamic_viscosity.value, 0.20317952748697918));
        assert!(close(analysis.mean_dynamic_viscosity.error, 0.013497918124781844));
        assert!(close(analysis.mean_ladenburg_viscosity.value, 0.1889825700954418));
        assert!(close(analysis.mean_ladenburg_viscosity.error, 0.011534798110404672));

        assert!(close(analysis.kinematic_viscosity.value, 0.0002105487331471287));
        assert!(close(analysis.kinematic_viscosity.error, 1.3878391040048058e-5));

        assert!(close(analysis.reynolds[0].value, 0.0011036931818181822));
        assert!(close(analysis.reynolds[1].value, 0.001142647058823529));
        assert!(close(analysis.reynolds[0].error, 6.649482135814985e-5));
        assert!(close(analysis.reynolds[1].error, 6.9405590235117e-5));
    }

    #[test]
    fn test_every_error_range_is_nonnegative() {
        let analysis = analyze(&fixture(), &Apparatus::default()).unwrap();
        for q in analysis
            .mean_times
            .iter()
            .chain(&analysis.mean_velocities)
            .chain(&analysis.dynamic_viscosity)
            .chain(&analysis.ladenburg_viscosity)
            .chain(&analysis.reynolds)
        {
            assert!(q.error >= 0.0);
        }
        assert!(analysis.mean_dynamic_viscosity.error >= 0.0);
        assert!(analysis.mean_ladenburg_viscosity.error >= 0.0);
        assert!(analysis.kinematic_viscosity.error >= 0.0);
    }

    #[test]
    fn test_exact_inputs_give_zero_ranges() {
        // identical trials kill the time spread, and an exact apparatus
        // plus exact densities kills everything downstream
        let data = Dataset::new(
            MeasurementTable::from_rows(vec![vec![10.0, 10.0], vec![10.0, 10.0]]).unwrap(),
            vec![0.002, 0.002],
            vec![2500.0, 2500.0],
            vec![0.0, 0.0],
        )
        .unwrap();
        let apparatus = Apparatus {
            cylinder_length: Quantity::exact(0.20),
            cylinder_diameter: Quantity::exact(0.0635),
            globule_diameter_error: 0.0,
            gravity: Quantity::exact(9.81235),
            fluid_density: Quantity::exact(965.0),
        };
        let analysis = analyze(&data, &apparatus).unwrap();
        assert_eq!(analysis.mean_times[0].error, 0.0);
        assert_eq!(analysis.mean_velocities[0].error, 0.0);
        assert_eq!(analysis.dynamic_viscosity[0].error, 0.0);
        assert_eq!(analysis.ladenburg_viscosity[1].error, 0.0);
        assert_eq!(analysis.mean_dynamic_viscosity.error, 0.0);
        assert_eq!(analysis.kinematic_viscosity.error, 0.0);
        assert_eq!(analysis.reynolds[0].error, 0.0);
    }

    #[test]
    fn test_columns_are_independent_under_permutation() {
        let swapped = Dataset::new(
            MeasurementTable::from_rows(vec![vec![8.0, 10.0], vec![9.0, 12.0]]).unwrap(),
            vec![0.0025, 0.002],
            vec![2500.0, 2500.0],
            vec![10.0, 10.0],
        )
        .unwrap();
        let apparatus = Apparatus::default();
        let original = analyze(&fixture(), &apparatus).unwrap();
        let permuted = analyze(&swapped, &apparatus).unwrap();

        assert_eq!(original.mean_times[0], permuted.mean_times[1]);
        assert_eq!(original.mean_times[1], permuted.mean_times[0]);
        assert_eq!(original.dynamic_viscosity[0], permuted.dynamic_viscosity[1]);
        assert_eq!(original.ladenburg_viscosity[0], permuted.ladenburg_viscosity[1]);
        assert_eq!(original.reynolds[0], permuted.reynolds[1]);
        // cross-configuration aggregates see the same set of values
        assert_eq!(
            original.mean_dynamic_viscosity,
            permuted.mean_dynamic_viscosity
        );
        assert_eq!(original.kinematic_viscosity, permuted.kinematic_viscosity);
    }

    #[test]
    fn test_single_trial_fails_with_insufficient_data() {
        let data = Dataset::new(
            MeasurementTable::from_row(vec![10.0, 8.0]).unwrap(),
            vec![0.002, 0.0025],
            vec![2500.0, 2500.0],
            vec![10.0, 10.0],
        )
        .unwrap();
        let result = analyze(&data, &Apparatus::default());
        assert!(matches!(
            result,
            Err(AnalysisError::InsufficientData {
                stage: stage::MEAN_TIME_ERRORS,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_single_configuration_fails_at_cross_aggregation() {
        let data = Dataset::new(
            MeasurementTable::from_rows(vec![vec![10.0], vec![12.0]]).unwrap(),
            vec![0.002],
            vec![2500.0],
            vec![10.0],
        )
        .unwrap();
        let result = analyze(&data, &Apparatus::default());
        assert!(matches!(
            result,
            Err(AnalysisError::InsufficientData {
                stage: stage::MEAN_DYNAMIC_VISCOSITY,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_buoyant_globules_fail_at_reynolds() {
        // globule density equal to the fluid density makes the dynamic
        // viscosity zero, which the Reynolds stage must reject
        let data = Dataset::new(
            MeasurementTable::from_rows(vec![vec![10.0, 8.0], vec![12.0, 9.0]]).unwrap(),
            vec![0.002, 0.0025],
            vec![965.0, 965.0],
            vec![0.0, 0.0],
        )
        .unwrap();
        let result = analyze(&data, &Apparatus::default());
        assert!(matches!(
            result,
            Err(AnalysisError::DivisionByZero {
                stage: stage::REYNOLDS,
                denominator: "dynamic viscosity",
                ..
            })
        ));
    }
}
