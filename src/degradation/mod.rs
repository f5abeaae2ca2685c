// Degradations - controlled distortions applied to a host audio buffer
//
// Each degradation declares its parameters as (name, default, description)
// triples, receives their values as strings and applies itself in place.
//
// - mix.rs: noise mixing at a target SNR

pub mod mix;

use anyhow::Result;

use crate::audio::AudioHost;
use crate::error::DegradationError;

pub use mix::{DegradationMix, DiagnosticsCallback, MixDiagnostics};

/// Declared parameter of a degradation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Ordered parameter values, seeded from the declared defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValues {
    values: Vec<(String, String)>,
}

impl ParameterValues {
    pub fn from_info(info: &[ParameterInfo]) -> Self {
        Self {
            values: info
                .iter()
                .map(|p| (p.name.to_string(), p.default.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns false when `name` was never declared
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                *v = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

pub trait Degradation: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters_info(&self) -> &'static [ParameterInfo];
    fn parameters(&self) -> &ParameterValues;
    fn parameters_mut(&mut self) -> &mut ParameterValues;

    /// Replace the host samples with the degraded version.
    ///
    /// On error the host buffer is left as it was.
    fn apply(&self, host: &mut dyn AudioHost) -> Result<()>;

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        if self.parameters_mut().set(name, value) {
            Ok(())
        } else {
            Err(DegradationError::UnknownParameter(name.to_string()).into())
        }
    }

    /// Assign positional values to the declared parameters, in order.
    ///
    /// Parameters without a value keep their current one.
    fn set_parameters_from_list(&mut self, values: &[String]) -> Result<()> {
        let info = self.parameters_info();
        if values.len() > info.len() {
            return Err(DegradationError::InvalidParameter {
                name: self.name().to_string(),
                value: values.join(","),
            }
            .into());
        }
        for (param, value) in info.iter().zip(values) {
            self.set_parameter(param.name, value)?;
        }
        Ok(())
    }
}

/// Registered degradations as (name, description)
pub fn available_degradations() -> Vec<(&'static str, &'static str)> {
    vec![(mix::NAME, mix::DESCRIPTION)]
}

pub fn create_degradation(name: &str) -> Result<Box<dyn Degradation>> {
    match name {
        mix::NAME => Ok(Box::new(DegradationMix::new())),
        other => Err(DegradationError::UnknownDegradation(other.to_string()).into()),
    }
}
