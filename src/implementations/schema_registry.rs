use std::collections::HashMap;

use log::debug;

use crate::errors::{ BenchError, BenchResult };
use crate::implementations::config::ToolConfig;
use crate::models::common::Domain;
use crate::models::schema::{ VariableDeclaration, VariableSchema };

/// Lookup from domain to its validated variable schema.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, VariableSchema>,
}

impl SchemaRegistry {
    /// Registry holding the built-in domains only
    pub fn builtin() -> BenchResult<Self> {
        let mut schemas = HashMap::new();
        for domain in Domain::BUILTIN.iter() {
            let schema = builtin_schema(domain)?;
            schemas.insert(domain.key().to_string(), schema);
        }
        Ok(Self { schemas })
    }

    /// Built-in domains plus the custom schemas declared in `config`
    pub fn from_config(config: &ToolConfig) -> BenchResult<Self> {
        let mut registry = Self::builtin()?;
        for (name, variables) in &config.schemas {
            registry.register(name, variables.clone())?;
        }
        Ok(registry)
    }

    /// Add or replace a schema under `name`
    pub fn register(&mut self, name: &str, variables: Vec<VariableDeclaration>) -> BenchResult<()> {
        let schema = VariableSchema::new(name, variables)?;
        debug!("Registered schema `{}` with {} variables", name, schema.len());
        self.schemas.insert(name.to_string(), schema);
        Ok(())
    }

    pub fn schema_for(&self, domain: &Domain) -> BenchResult<&VariableSchema> {
        self.schemas
            .get(domain.key())
            .ok_or_else(|| BenchError::UnknownDomain(domain.key().to_string()))
    }

    /// Registered domain keys, sorted
    pub fn domains(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.schemas.keys().cloned().collect();
        keys.sort();
        keys
    }
}

fn builtin_schema(domain: &Domain) -> BenchResult<VariableSchema> {
    let variables = match domain {
        Domain::Master => master_variables(),
        Domain::Rover => rover_variables(),
        Domain::LungVentilator => lung_ventilator_variables(),
        Domain::Drone => drone_variables(),
        Domain::Pipeline => pipeline_variables(),
        Domain::Lifted => lifted_variables(),
        Domain::Custom(name) => {
            return Err(BenchError::UnknownDomain(name.clone()));
        }
    };
    VariableSchema::new(domain.key(), variables)
}

fn master_variables() -> Vec<VariableDeclaration> {
    vec![
        VariableDeclaration::boolean("alert").with_description(
            "Output: sound an alert under determined condition"
        ),
        VariableDeclaration::enumeration("classifier", &[0, 1, 2]).with_description(
            "Input: detected human, 0 = none, 1 = worker, 2 = untrained person"
        ),
        VariableDeclaration::boolean("dgt_3").with_description(
            "Internal: distance greater than 3 meters"
        ),
        VariableDeclaration::boolean("dgt_7").with_description(
            "Internal: distance greater than 7 meters"
        ),
        VariableDeclaration::range("distance_to_target", 0, 10).with_description(
            "Input: distance to identified human in meters"
        ),
        VariableDeclaration::boolean("halt").with_description("Output: stop the robot"),
        VariableDeclaration::enumeration("OpState", &[0, 1, 2, 3]).with_description(
            "Output: current active mitigation state"
        ),
        VariableDeclaration::boolean("slowdown").with_description("Output: slow down the robot"),
        VariableDeclaration::boolean("turnoffUVC").with_description("Output: turn off UV lights")
    ]
}

fn rover_variables() -> Vec<VariableDeclaration> {
    let positions = [
        "battery",
        "chargePosition",
        "goal",
        "pre_battery",
        "n",
        "plan",
        "chargeNeeded_var",
        "length_plan",
        "currentPosition",
        "initialPosition",
        "currentPhysicalPosition",
        "start",
        "s0",
        "obstacle",
        "speed",
        "x",
        "y",
    ];
    let flags = [
        "recharge",
        "batteryFull",
        "atGoal",
        "Obstacle",
        "Obstacle_currentPosition",
        "removeGoalFromSet",
    ];

    positions
        .iter()
        .map(|name| VariableDeclaration::range(name, 0, 100))
        .chain(flags.iter().map(|name| VariableDeclaration::boolean(name)))
        .collect()
}

const LUNG_VENTILATOR_FLAGS: &[&str] = &[
    "ADCConnFailure", "BreathingCycleStart", "CONT", "ExpiratoryPhaseEnd", "Fail",
    "FailSafeMode", "GUIConnected", "GUIFailure", "GUIResumeRequest", "ITS_PCV", "ITS_PSV",
    "OutOfServiceWarning", "PCVInspTimeEnd", "PCVMode", "PCVModeSelected", "PSVMode",
    "PSVModeSelected", "Pass", "RM", "RMButton", "SelfTestFail", "SelfTestMode", "SensorUse",
    "Skip", "StandbyMode", "StartUpDone", "StartUpMode", "_PRC_", "airSupplyConnected",
    "alarmSettingsChanged", "apnea", "apneaAlarm", "breathingCircuitConnected",
    "breathingCycleDone", "breathingCycleStart", "breathingTimerReset", "buttonUnPressOr",
    "checkCommsGUI", "checkCommsSensors", "checkCommsValves", "confirmPSVParameters",
    "defaultParamsLoaded", "disableLeakCompensation", "dropPAW", "enableLeakCompensation",
    "enterAlarmThresholds", "eraseLog", "error", "expirationPhaseEnd",
    "expirationPhaseStart", "expiratoryPause", "expiratoryPauseButton", "expiratoryPhase",
    "expiratoryPhaseEnd", "expiratoryState", "gasSupplyFailure", "highPriorityAlarm",
    "inValveClose", "inValveOpen", "initDone", "initFail", "initStart", "inspiratoryPause",
    "inspiratoryPauseButton", "inspiratoryPhase", "inspiratoryPhaseEnd",
    "inspiratoryPhaseStart", "leakCompensation", "leakCompensationActive",
    "leakCompensationEnable", "loadLastParams", "loadLog", "logAlarmParams",
    "logAlarmSettings", "logCalibrationParams", "logO", "logParams", "logPatientChange",
    "logPowerSupply", "logPreUseCheck", "logVentilationParams", "logVentilatorSettings",
    "monitorInhaleTrigger", "newPatient", "off", "operator", "outValveClose", "outValveOpen",
    "parametersStored", "patientAttributesEntered", "patientBreathTrigger",
    "patientBreathingRequest", "patientChanged", "patientConnected", "patientSafe",
    "powerButton", "powerConnected", "powerFailure", "powerOff", "powerSupplyChanged",
    "preUseCheckDone", "pressureSensorConnFailure", "pressureSensorError",
    "resumeVentilation", "runSelfTest", "saveLog", "selfTestFailed", "selfTestPassed",
    "startMonitoring", "startPCV", "startPSV", "startReportingHealthParams",
    "stopVentilation", "testAlarmsFail", "testAlarmsPass", "testAlarmsSkip", "testFL",
    "testLeaksFail", "testLeaksPass", "testLeaksSkip", "testOxygenSensorFail",
    "testOxygenSensorPass", "testOxygenSensorSkip", "testPSExpFail", "testPSExpPass",
    "testPSExpSkip", "testPowerSwitchFail", "testPowerSwitchPass", "testPowerSwitchSkip",
    "user", "ventilating", "ventilationOff", "ventilationParamsAdjustable",
    "ventilatorSettingsChanged",];

const LUNG_VENTILATOR_RANGES: &[(&str, i64, i64)] = &[
    ("ADCError", 0, 10),
    ("ADCRetries", 0, 10),
    ("ExpiratoryTime", 0, 5000),
    ("ExpiratoryTriggerSensitivity", 0, 100),
    ("FinalState", 0, 10),
    ("GBPS", 0, 1000),
    ("IToE", 0, 10),
    ("IToE_AP", 0, 10),
    ("InhaleTriggerSensitivityPCV", 0, 100),
    ("InhaleTriggerSensitivityPSV", 0, 100),
    ("ItoE", 0, 10),
    ("ItoE_AP", 0, 10),
    ("ItoE_PCV", 0, 10),
    ("MaxP_insp", 0, 100),
    ("MinPEEPAtmAnalyzer", 0, 50),
    ("P_insp", 0, 100),
    ("P_inspAP", 0, 100),
    ("P_inspPCV", 0, 100),
    ("P_inspPSV", 0, 100),
    ("PeakV_E", 0, 1000),
    ("RR", 0, 100),
    ("RR_AP", 0, 100),
    ("RR_PCV", 0, 100),
    ("Seconds", 0, 10000),
    ("V_E", 0, 1000),
    ("apneaLagTime", 0, 10000),
    ("breathingCycleTime", 0, 10000),
    ("breathingTime", 0, 10000),
    ("displayF", 0, 100),
    ("displayO", 0, 100),
    ("displayRR", 0, 100),
    ("displayTV", 0, 1000),
    ("expClock", 0, 10000),
    ("inspClock", 0, 10000),
    ("inspiratoryPressure", 0, 100),
    ("inspiratoryTime", 0, 10000),
    ("measureF", 0, 100),
    ("measureO", 0, 100),
    ("measurePSins", 0, 100),
    ("measureRR", 0, 100),
    ("measureTV", 0, 1000),
    ("minExpiratoryTime", 0, 10000),
    ("paramAlarm_V", 0, 100),
    ("paramMax_V", 0, 100),
    ("paramMin_V", 0, 100),
    ("param_V", 0, 100),
    ("pressureSensorRetries", 0, 10),
];

fn lung_ventilator_variables() -> Vec<VariableDeclaration> {
    LUNG_VENTILATOR_FLAGS.iter()
        .map(|name| VariableDeclaration::boolean(name))
        .chain(
            LUNG_VENTILATOR_RANGES.iter().map(|(name, lo, hi)| {
                VariableDeclaration::range(name, *lo, *hi)
            })
        )
        .collect()
}

const DRONE_FLAGS: &[&str] = &[
    "SimulationMode", "SimulationModeRaspberry", "HILSimulationGazebo",
    "AutonomousFlightMode", "RemoteControlFlightMode", "FailsafeFlightMode", "RealMode",
    "HILSimulation", "SimulateCommunications", "SimulatePackageSending",
    "SimulateFailureTransition", "SimulatePacketLoss", "SimulationLoopStart",
    "SimulationLoopFinish", "SimulationDataSaved", "JetsonFailureDetectionRunning",
    "JetsonFailureTransitionToNucleo", "RaspberryFailureDetectionRunning",
    "ActiveNucleoFailureDetectionRunning", "NucleoFailureSwitchActiveNucleo", "ActiveNucleo",
    "NucleoOnline", "JetsonControl", "JetsonControlDisplay", "NucleoOneControl",
    "SendNucleoOneControlMessage", "NucleoTwoControl", "SendNucleoTwoControlMessage",
    "NulceoControl", "NucleoControlDisplay", "NucleoControl", "DisplayCurrentController",
    "SendBatteryDischargeRateData", "MonitorBatteryDischargeRate", "MonitorAngularVelocity",
    "SendAngularVelocityData", "NucleoOneFailureDetectionRunning", "ControlLoopStart",
    "ControlLoopFinish", "ControlLoopStartRaspberry", "ControlLoopStartNucleo",
    "ControlAlgorithmStart", "ControlAlgorithmFinish", "EvaluateControllerPerformance",
    "MeasureControlTransition", "CollectHardwareExecutionTimes",
    "AssessHardwareTimePerformance", "MonitorCommunicationQuality",
    "MonitorPowerConsumption", "ReturnPowerConsumptionData", "ManageEnergySources",
    "MonitorBatteryStatus", "SendBatteryStatusData", "MonitorBatteryLevel",
    "SendBatteryLevelData", "MonitorBatteryVoltage", "SendBatteryVoltageData",
    "MonitorVoltageBusConsumption", "SendVoltageBusConsumptionData",
    "NucleoTwoFailureDetectionRunning", "OverallSystemHealthMonitoring",
    "ElectricSystemsHealthMonitoring", "ServoMonitoring", "BatteryMonitoring",
    "UseRealTimeClock", "MonitoringEnabled", "MonitoringEnabledRaspberry",
    "MonitorGroundSpeed", "SendGroundSpeedData", "MonitorWindSpeed", "SendWindSpeedData",
    "MonitorPitotTube", "SendPitotTubeData", "MonitorAlphaVane", "SendAlphaVaneData",
    "MonitorBetaVane", "SendBetaVaneData", "MonitorServoMotors", "SendServoMotorsData",
    "MonitorTiltAngles", "SendTiltAngleData", "MonitorAccelerations",
    "SendAccelerationsData", "MonitorBarometerAltitude", "SendBarometerAltitudeData",
    "MonitorRow", "SendRowData", "MonitorPitch", "SendPitchData", "MonitorYaw",
    "SendYawData", "MonitorAccelerometerData", "SendAccelerometerData",
    "MonitorGyroscopeData", "SendGyroscopeData", "MonitorMagnetometerData",
    "SendMagnetometerData", "MonitorCompassData", "SendCompassData", "MonitorGPSLatitude",
    "MonitorGPSLongitude", "MonitorGPSAltitude", "MonitorGPSHomePosition", "SendGPSData",
    "SatelliteShadowing", "NoReceptionLoS", "SignalDiffraction", "MultipathEffects",
    "PositioningAccuracy", "MonitorRTKData", "SendRTKData", "MonitorMotorRPM",
    "SendMotorRPM", "MonitorPropellerRPM", "SendPropellerRPMData",
    "MonitorComponentsTemeratures", "SendComponentsTemperaturesData",
    "MonitorInternalTemperature", "SendInternalTemperatureData", "MonitorBayAreaTemperature",
    "SendBayAreaTemperatureData", "MonitorBrushlessCurrent", "MonitorESCCurrent",
    "MonitorServoMotorCurrent",];

fn drone_variables() -> Vec<VariableDeclaration> {
    DRONE_FLAGS.iter()
        .map(|name| VariableDeclaration::boolean(name))
        .chain([
            VariableDeclaration::range("PacketLossRate", 0, 100).with_description(
                "Internal: encoded packet loss rate percentage"
            ),
            VariableDeclaration::range("AcceptablePacketLoss", 0, 100).with_description(
                "Internal: maximum acceptable packet loss percentage"
            ),
        ])
        .collect()
}

fn pipeline_variables() -> Vec<VariableDeclaration> {
    vec![
        VariableDeclaration::range("variable_1", 0, 100).with_description("Input integer"),
        VariableDeclaration::range("variable_2", 0, 100).with_description("Input integer"),
        VariableDeclaration::boolean("variable_3").with_description("Input boolean"),
        VariableDeclaration::boolean("variable_4").with_description("Input boolean"),
        VariableDeclaration::range("variable_5", 0, 100).with_description("Integer constant"),
        VariableDeclaration::range("variable_6", 0, 100).with_description("Internal integer")
    ]
}

fn lifted_variables() -> Vec<VariableDeclaration> {
    (1..=7)
        .map(|i| VariableDeclaration::boolean(&format!("prop_{}", i)))
        .collect()
}
