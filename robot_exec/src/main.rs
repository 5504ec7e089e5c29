//! Main robot-side executable entry point.
//! 
//! # Architecture
//! 
//! The general execution methodology consists of:
//! 
//!     - Initialise all modules
//!     - Main loop:
//!         - Operator command processing (from the script)
//!         - Sensor acquisition from the simulated equipment
//!         - Robot processing (drive, lift and intake control)
//!         - Simulated equipment stepping
//!         - Archiving
//! 
//! # Modules
//! 
//! All modules (e.g. `lift_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!     

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::{WrapErr, eyre}};

// Internal
use robot_lib::{
    eqpt::{ImuSensor, LiftEncoder},
    params::RobotExecParams,
    robot::{OpCmd, Robot, RobotInput},
    sim::{SimImu, SimLift},
};
use util::{
    host, 
    module::State,
    logger::{logger_init, LevelFilter},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingCmds},
    archive::Archived,
    time::monotonic_ms,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    color_eyre::install()?;

    // Initialise session
    let session = Session::new(
        "robot_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, LevelFilter::Info, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Stacker Robot Executable\n");
    info!(
        "Running on: {:#?}", 
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: RobotExecParams = util::params::load(
        "robot_exec.toml"
    ).wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- LOAD SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!(
            "Expected a single argument (the path to the script), found {}", args.len() - 1)
        );
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut si: ScriptInterpreter<OpCmd> = ScriptInterpreter::new(
        &args[1]).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} commands\n",
        si.get_duration(),
        si.get_num_cmds()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut robot = Robot::default();

    robot.drive_ctrl.init("drive_ctrl.toml", &session)
        .wrap_err("Failed to initialise DriveCtrl")?;
    info!("DriveCtrl init complete");

    robot.lift_ctrl.init("lift_ctrl.toml", &session)
        .wrap_err("Failed to initialise LiftCtrl")?;
    info!("LiftCtrl init complete");

    robot.intake_ctrl.init("intake_ctrl.toml", &session)
        .wrap_err("Failed to initialise IntakeCtrl")?;
    info!("IntakeCtrl init complete");

    robot.init_archive(&session)
        .wrap_err("Failed to initialise the telemetry archive")?;

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    let mut imu = SimImu::new(&exec_params.sim);
    let mut lift = SimLift::new(&exec_params.sim, exec_params.sim_lift_start_in);

    info!("Simulated equipment initialised");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let exec_start_instant = Instant::now();
    let mut num_cycles: u64 = 0;

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- OPERATOR COMMAND PROCESSING ----

        let script_time_s = (cycle_start_instant - exec_start_instant).as_secs_f64();

        match si.get_pending_cmds(script_time_s) {
            PendingCmds::None => (),
            PendingCmds::Some(cmd_vec) => {
                for cmd in cmd_vec.iter() {
                    robot.exec(cmd, &mut imu, &mut lift);
                }
            }
            // Exit if end of script reached
            PendingCmds::EndOfScript => {
                info!("End of script reached, stopping");
                break
            }
        }

        // ---- ROBOT PROCESSING ----

        let input = RobotInput {
            heading_deg: imu.yaw_deg(),
            raw_ticks: lift.raw_ticks(),
            time_ms: monotonic_ms(),
        };

        let output = robot.proc(&input);

        // ---- EQUIPMENT ----

        imu.step(&output.wheels, exec_params.cycle_period_s);
        lift.step(output.lift.lift_power, exec_params.cycle_period_s);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = robot.write() {
            warn!("Could not archive telemetry: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s", 
                cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
            )
        }

        num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("Executed {} cycles", num_cycles);
    info!("Final lift height: {:.02} in", robot.lift_ctrl.height_in());

    session.save("robot_tm_final.json", robot.tm());
    session.exit();

    info!("End of execution");

    Ok(())
}
