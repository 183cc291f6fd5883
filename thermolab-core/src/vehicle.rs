//! Module containing the vehicle spec struct and related functions.

use crate::imports::*;

/// Static description of a battery-electric vehicle, constant for a whole session.
///
/// All numeric fields must be finite and strictly positive; efficiencies lie in (0, 1].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VehicleSpec {
    /// Display name
    pub name: String,
    /// Vehicle mass, kg
    pub mass_kg: f64,
    /// Aerodynamic drag coefficient
    pub drag_coef: f64,
    /// Projected frontal area for drag calculations, m²
    pub frontal_area_m2: f64,
    /// Air density, kg/m³
    pub air_density_kg_per_m3: f64,
    /// Rolling resistance force, treated as constant while moving, N
    pub rolling_res_n: f64,
    /// Wheel radius, m
    pub wheel_radius_m: f64,
    /// Reduction gearbox ratio between motor and wheels
    pub gear_ratio: f64,
    /// Motor torque rating, N·m
    pub max_motor_torque_nm: f64,
    /// Motor speed rating, rpm
    pub max_motor_rpm: f64,
    /// Motor electrical power rating, kW
    pub max_motor_kw: f64,
    /// Maximum propulsive force at the wheels, N
    pub max_prop_force_n: f64,
    /// Maximum braking force at the wheels, N
    pub max_brake_force_n: f64,
    /// Cap on regenerative braking power, kW
    pub regen_max_kw: f64,
    /// Electrical to mechanical conversion efficiency
    pub motor_eff: f64,
    /// Mechanical to electrical conversion efficiency while braking
    pub regen_eff: f64,
    /// Nominal battery capacity, kWh. Informational only.
    pub battery_kwh: f64,
    /// Scaled capacity used for SOC bookkeeping so SOC visibly moves, kWh
    pub demo_capacity_kwh: f64,
    /// Battery pack voltage, V
    pub battery_voltage_v: f64,
    /// Constant auxiliary (HVAC etc.) electrical load, kW
    pub aux_kw: f64,
}

impl Default for VehicleSpec {
    /// EV-X 800V Concept
    fn default() -> Self {
        Self {
            name: "EV-X 800V Concept".into(),
            mass_kg: 1800.0,
            drag_coef: 0.28,
            frontal_area_m2: 2.4,
            air_density_kg_per_m3: 1.225,
            rolling_res_n: 150.0,
            wheel_radius_m: 0.35,
            gear_ratio: 9.73,
            max_motor_torque_nm: 400.0,
            max_motor_rpm: 16_000.0,
            max_motor_kw: 250.0,
            max_prop_force_n: 9_000.0,
            max_brake_force_n: 15_000.0,
            regen_max_kw: 80.0,
            motor_eff: 0.92,
            regen_eff: 0.70,
            battery_kwh: 77.4,
            demo_capacity_kwh: 1.0,
            battery_voltage_v: 800.0,
            aux_kw: 1.5,
        }
    }
}

impl VehicleSpec {
    /// Aerodynamic drag force at `speed_mps`, N
    pub fn aero_drag_n(&self, speed_mps: f64) -> f64 {
        0.5 * self.air_density_kg_per_m3
            * self.drag_coef
            * self.frontal_area_m2
            * speed_mps.powi(2)
    }

    /// Wheel angular speed at `speed_mps`, rad/s
    pub fn wheel_omega(&self, speed_mps: f64) -> f64 {
        speed_mps / self.wheel_radius_m
    }

    /// Motor shaft speed at `speed_mps`, rpm
    pub fn motor_rpm(&self, speed_mps: f64) -> f64 {
        self.wheel_omega(speed_mps) * self.gear_ratio * 60.0 / (2.0 * std::f64::consts::PI)
    }

    /// Motor shaft torque needed to deliver `force_n` at the wheels, N·m
    pub fn motor_torque_nm(&self, force_n: f64) -> f64 {
        force_n * self.wheel_radius_m / self.gear_ratio
    }

    /// Speed at which the motor reaches its rpm rating, m/s
    pub fn top_speed_mps(&self) -> f64 {
        self.max_motor_rpm * 2.0 * std::f64::consts::PI / 60.0 / self.gear_ratio
            * self.wheel_radius_m
    }
}

impl ObjState for VehicleSpec {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.push(anyhow!("Vehicle name must not be empty!"));
        }
        chk_num_gtz_fin(&mut errors, self.mass_kg, "Mass");
        chk_num_gtz_fin(&mut errors, self.drag_coef, "Drag coefficient");
        chk_num_gtz_fin(&mut errors, self.frontal_area_m2, "Frontal area");
        chk_num_gtz_fin(&mut errors, self.air_density_kg_per_m3, "Air density");
        chk_num_gtz_fin(&mut errors, self.rolling_res_n, "Rolling resistance");
        chk_num_gtz_fin(&mut errors, self.wheel_radius_m, "Wheel radius");
        chk_num_gtz_fin(&mut errors, self.gear_ratio, "Gear ratio");
        chk_num_gtz_fin(&mut errors, self.max_motor_torque_nm, "Max motor torque");
        chk_num_gtz_fin(&mut errors, self.max_motor_rpm, "Max motor rpm");
        chk_num_gtz_fin(&mut errors, self.max_motor_kw, "Max motor power");
        chk_num_gtz_fin(&mut errors, self.max_prop_force_n, "Max propulsive force");
        chk_num_gtz_fin(&mut errors, self.max_brake_force_n, "Max braking force");
        chk_num_gtz_fin(&mut errors, self.regen_max_kw, "Regen power cap");
        chk_eff(&mut errors, self.motor_eff, "Motor efficiency");
        chk_eff(&mut errors, self.regen_eff, "Regen efficiency");
        chk_num_gtz_fin(&mut errors, self.battery_kwh, "Nominal battery capacity");
        chk_num_gtz_fin(&mut errors, self.demo_capacity_kwh, "Demo battery capacity");
        chk_num_gtz_fin(&mut errors, self.battery_voltage_v, "Battery voltage");
        chk_num_gtz_fin(&mut errors, self.aux_kw, "Auxiliary load");
        early_err!(errors, "VehicleSpec");

        if self.max_motor_torque_nm * self.gear_ratio / self.wheel_radius_m
            < self.max_prop_force_n * 0.5
        {
            log::warn!(
                "{}: max propulsive force {} N is well above what the motor torque rating delivers at the wheels",
                self.name,
                self.max_prop_force_n
            );
        }
        errors.make_err()
    }
}

impl SerdeAPI for VehicleSpec {
    fn init(&mut self) -> anyhow::Result<()> {
        self.validate()
            .with_context(|| format!("Invalid vehicle spec {:?}", self.name))?;
        Ok(())
    }
}
