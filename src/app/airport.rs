//! # Control Tower
//!
//! The smallest useful picture of the mediator: airplanes subscribe to
//! one shared bus, the tower publishes a flight number, and only the
//! matching plane lands. Nobody holds a reference to anybody else.

use anyhow::Result;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::events::{BusError, EventBus, CLEAR_FOR_LANDING};

/// Fuel burnt by one call to [`Aircraft::fly`]
pub const FUEL_PER_FLIGHT: i64 = 20;

/// Behaviour shared by everything that flies
pub trait Aircraft {
    fn airplane(&self) -> &Airplane;

    fn airplane_mut(&mut self) -> &mut Airplane;

    fn number(&self) -> u32 {
        self.airplane().number
    }

    fn fuel(&mut self, amount: i64) -> &mut Self {
        self.airplane_mut().fuel_tank = amount;
        self
    }

    fn fly(&mut self) -> &mut Self {
        let plane = self.airplane_mut();
        tracing::info!("{} {} flying", plane.airline, plane.number);
        plane.fuel_tank -= FUEL_PER_FLIGHT;
        self
    }

    /// Land if `flight` is this plane's number
    fn land(&mut self, flight: u32) -> &mut Self {
        let plane = self.airplane_mut();
        if flight == plane.number {
            tracing::info!("wheels down skid skid landed {}", plane.number);
            plane.landed = true;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airplane {
    airline: String,
    number: u32,
    fuel_tank: i64,
    landed: bool,
}

impl Airplane {
    pub fn new(airline: impl Into<String>, number: u32) -> Self {
        Self {
            airline: airline.into(),
            number,
            fuel_tank: 0,
            landed: false,
        }
    }

    /// Create a plane that listens to `tower` for landing clearance
    pub fn register(airline: impl Into<String>, number: u32, tower: &EventBus) -> Rc<RefCell<Self>> {
        let plane = Rc::new(RefCell::new(Self::new(airline, number)));
        tower.subscribe_bound(CLEAR_FOR_LANDING, &plane, Self::on_clearance);
        plane
    }

    pub fn airline(&self) -> &str {
        &self.airline
    }

    pub fn fuel_tank(&self) -> i64 {
        self.fuel_tank
    }

    pub fn has_landed(&self) -> bool {
        self.landed
    }

    fn on_clearance(&mut self, args: &[Value]) -> Result<()> {
        let flight = args
            .first()
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok());
        if let Some(flight) = flight {
            self.land(flight);
        }
        Ok(())
    }
}

impl Aircraft for Airplane {
    fn airplane(&self) -> &Airplane {
        self
    }

    fn airplane_mut(&mut self) -> &mut Airplane {
        self
    }
}

/// A 747 is an airplane with nothing extra to say for itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boeing747 {
    plane: Airplane,
}

impl Boeing747 {
    pub fn new(airline: impl Into<String>, number: u32) -> Self {
        let plane = Airplane::new(airline, number);
        tracing::debug!("747 {}", plane.number);
        Self { plane }
    }

    pub fn register(airline: impl Into<String>, number: u32, tower: &EventBus) -> Rc<RefCell<Self>> {
        let plane = Rc::new(RefCell::new(Self::new(airline, number)));
        tower.subscribe_bound(CLEAR_FOR_LANDING, &plane, Self::on_clearance);
        plane
    }

    fn on_clearance(&mut self, args: &[Value]) -> Result<()> {
        self.plane.on_clearance(args)
    }
}

impl Aircraft for Boeing747 {
    fn airplane(&self) -> &Airplane {
        &self.plane
    }

    fn airplane_mut(&mut self) -> &mut Airplane {
        &mut self.plane
    }
}

/// Flight numbers of the demo fleet
pub const FLEET: [u32; 3] = [1457, 254, 567];

/// Register the demo fleet on a fresh tower, clear each of `flights` in
/// turn and report which planes landed, in fleet order
pub fn simulate(flights: &[u32]) -> Result<Vec<u32>> {
    let tower = EventBus::new();
    let fleet: Vec<_> = FLEET
        .iter()
        .map(|&number| Airplane::register("southwest", number, &tower))
        .collect();

    for &flight in flights {
        clear_for_landing(&tower, flight)?;
    }

    let landed = fleet
        .iter()
        .map(|plane| plane.borrow())
        .filter(|plane| plane.has_landed())
        .map(|plane| plane.number())
        .collect();
    Ok(landed)
}

/// Clear `flight` for landing, returning how many planes heard it
pub fn clear_for_landing(tower: &EventBus, flight: u32) -> Result<usize, BusError> {
    tracing::info!("Tower clearing flight {} for landing", flight);
    tower.publish(CLEAR_FOR_LANDING, &[Value::from(flight)])
}
