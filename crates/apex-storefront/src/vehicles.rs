//! Vehicle and parts lookup services.

use std::sync::Arc;

use apex_commerce::catalog::{CompatiblePart, MockCatalog, Vehicle, Vrm};
use async_trait::async_trait;

use crate::latency::{simulate, LatencyConfig};
use crate::StorefrontError;

/// A vehicle together with the parts that fit it.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParts {
    pub vehicle: Vehicle,
    pub parts: Vec<CompatiblePart>,
}

/// Registration lookup backend.
#[async_trait]
pub trait VehicleLookup: Send + Sync {
    /// Find the vehicle registered as `vrm`.
    async fn lookup_vehicle(&self, vrm: &Vrm) -> Result<Vehicle, StorefrontError>;

    /// Parts that fit an engine code.
    async fn compatible_parts(&self, engine_code: &str)
        -> Result<Vec<CompatiblePart>, StorefrontError>;

    /// Vehicle lookup followed by its parts lookup.
    async fn lookup_with_parts(&self, vrm: &Vrm) -> Result<VehicleParts, StorefrontError> {
        let vehicle = self.lookup_vehicle(vrm).await?;
        let parts = self.compatible_parts(&vehicle.engine_code).await?;
        Ok(VehicleParts { vehicle, parts })
    }
}

/// [`VehicleLookup`] over the demo catalog, with simulated latency.
#[derive(Debug, Clone)]
pub struct MockVehicleService {
    catalog: Arc<MockCatalog>,
    latency: LatencyConfig,
}

impl MockVehicleService {
    pub fn new(catalog: Arc<MockCatalog>, latency: LatencyConfig) -> Self {
        Self { catalog, latency }
    }

    pub fn catalog(&self) -> &MockCatalog {
        &self.catalog
    }
}

#[async_trait]
impl VehicleLookup for MockVehicleService {
    async fn lookup_vehicle(&self, vrm: &Vrm) -> Result<Vehicle, StorefrontError> {
        if vrm.is_empty() {
            return Err(StorefrontError::EmptyRegistration);
        }

        simulate(self.latency.vrm_lookup()).await;
        let vehicle = self
            .catalog
            .vehicle(vrm)
            .cloned()
            .ok_or_else(|| StorefrontError::VehicleNotFound(vrm.formatted()))?;
        tracing::debug!(vrm = %vrm, engine = %vehicle.engine_code, "vehicle found");
        Ok(vehicle)
    }

    async fn compatible_parts(
        &self,
        engine_code: &str,
    ) -> Result<Vec<CompatiblePart>, StorefrontError> {
        simulate(self.latency.parts_lookup()).await;
        Ok(self.catalog.compatible_parts(engine_code).to_vec())
    }
}
