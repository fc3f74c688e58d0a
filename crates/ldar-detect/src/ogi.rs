//! Optical gas imaging camera: a fixed log-logistic curve drawn per leak.
//!
//! MDL layout: `[x0_mean, x0_sd]`, the midpoint of the curve in g/s and its
//! spread.  For every leak the camera draws, in order:
//!
//! 1. `k ~ N(4.9, 0.3)`
//! 2. `x0 ~ N(x0_mean, x0_sd)`
//! 3. Bernoulli(PoD(rate; k, x0))
//! 4. Bernoulli(temporal_coverage)
//!
//! and detects only when both trials pass.  The camera always works leak by
//! leak, so it only accepts the component measurement scale.

use ldar_site::{AggregateRates, Site};

use crate::pod::{OGI_K_MEAN, OGI_K_SD, fixed_curve_pod, measured_rate};
use crate::{
    DetectEnv, DetectError, DetectResult, MeasurementScale, Sensor, SensorSettings,
    SiteDetectionReport, update_tag,
};

pub const OGI_CAMERA: &str = "OGI_camera";

#[derive(Clone, Debug, PartialEq)]
pub struct FixedCurveSensor {
    x0_mean:           f64,
    x0_sd:             f64,
    k_mean:            f64,
    k_sd:              f64,
    temporal_coverage: f64,
    qe:                f64,
}

impl FixedCurveSensor {
    /// Registry factory for `OGI_camera` (exactly 2 MDL values).
    pub fn ogi(settings: &SensorSettings) -> DetectResult<Self> {
        let mdl = &settings.sensor.mdl;
        if mdl.len() != 2 {
            return Err(DetectError::MdlCount { sensor: OGI_CAMERA.into(), expected: "2", got: mdl.len() });
        }
        if settings.scale != MeasurementScale::Component {
            return Err(DetectError::InvalidParameter {
                sensor: OGI_CAMERA.into(),
                reason: format!("measurement scale must be component, got {}", settings.scale),
            });
        }
        Ok(Self {
            x0_mean:           mdl[0],
            x0_sd:             mdl[1],
            k_mean:            OGI_K_MEAN,
            k_sd:              OGI_K_SD,
            temporal_coverage: settings.temporal_coverage,
            qe:                settings.sensor.qe,
        })
    }
}

impl Sensor for FixedCurveSensor {
    fn id(&self) -> &str {
        OGI_CAMERA
    }

    fn detect(
        &self,
        site:    &mut Site,
        rates:   &AggregateRates,
        venting: f64,
        env:     &mut DetectEnv<'_>,
    ) -> SiteDetectionReport {
        let mut report = SiteDetectionReport::new(site, rates, venting);

        for &i in &rates.leaks_present {
            let rate = site.leaks[i].rate;
            let k = env.rng.normal(self.k_mean, self.k_sd);
            let x0 = env.rng.normal(self.x0_mean, self.x0_sd);
            let detect_mdl = env.rng.bernoulli(fixed_curve_pod(k, x0, rate));
            let detect_coverage = env.rng.bernoulli(self.temporal_coverage);

            if detect_mdl && detect_coverage {
                report.found_leak = true;
                let m_rate = measured_rate(rate, self.qe, env.rng);
                if update_tag(&mut site.leaks[i], m_rate, env) {
                    report.site_measured_rate += m_rate;
                }
            } else {
                env.record_missed(site, 1);
            }
        }
        report
    }
}
