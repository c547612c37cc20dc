//! # Arm Control Executable
//!
//! This executable drives the three joint robotic arm:
//! - Samples the joystick for this cycle's motion request
//! - Converts the request into joint angle commands through the arm
//!   controller's active inverse kinematics method
//! - Commits the commands to the servos, provided every joint accepts them
//!
//! The loop runs at a fixed frequency and a failed motion request only drops
//! that cycle's motion - the executable itself keeps running.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, warn};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use arm_lib::{
    arm_ctrl::ArmCtrl,
    hw::sim::SimAnalogInput,
    hw::ServoOutput,
    joystick::Joystick,
    params::Params,
    servo_ctrl::ServoArm,
    CYCLE_FREQUENCY_HZ,
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Arm Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: Params =
        util::params::load("arm_exec.toml").wrap_err("Failed to load parameters")?;

    info!("Parameters loaded");

    // ---- HARDWARE INITIALISATION ----

    let [shoulder_out, elbow_out, hand_out] =
        build_servo_outputs(&params).wrap_err("Failed to initialise the servo outputs")?;

    // TODO: MCP3008 SPI ADC driver for the joystick channels. Until then the
    // stick reads as centred and the arm simply holds its pose.
    let mut joystick = Joystick::new(
        params.joystick.clone(),
        Box::new(SimAnalogInput::centred()),
        Box::new(SimAnalogInput::centred()),
        Some(Box::new(SimAnalogInput::centred())),
    );

    // ---- ARM INITIALISATION ----

    let shoulder = ServoArm::from_params("shoulder", &params.shoulder, shoulder_out)
        .wrap_err("Failed to create the shoulder joint")?;
    let elbow = ServoArm::from_params("elbow", &params.elbow, elbow_out)
        .wrap_err("Failed to create the elbow joint")?;
    let hand = ServoArm::from_params("hand", &params.hand, hand_out)
        .wrap_err("Failed to create the hand joint")?;

    let mut arm = ArmCtrl::new(params.arm_ctrl.clone(), shoulder, elbow, hand)
        .wrap_err("Failed to create the arm controller")?;

    info!(
        "Driving the arm to the initial pose {}",
        params.arm_ctrl.initial_pose
    );
    arm.move_arms_to(params.arm_ctrl.initial_pose);

    // ---- MAIN LOOP ----

    info!("Initialisation complete, entering main loop");

    let cycle_period = Duration::from_secs_f64(1.0 / CYCLE_FREQUENCY_HZ);

    loop {
        let cycle_start = Instant::now();

        // Get this cycle's motion request from the joystick
        let request = joystick.get_delta();

        if !request.is_zero() {
            if request.delta.x_cm != 0.0 || request.delta.y_cm != 0.0 {
                arm.move_by(request.delta.x_cm, request.delta.y_cm);
            }

            if request.rotation_deg != 0.0 {
                arm.rotate_hand_by(request.rotation_deg);
            }
        }

        // Sleep out the remainder of the cycle
        match cycle_period.checked_sub(cycle_start.elapsed()) {
            Some(remaining) => thread::sleep(remaining),
            None => warn!(
                "Control cycle overran its {} ms budget",
                cycle_period.as_millis()
            ),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the servo output for each joint.
///
/// On the Pi target all three joints share a single PCA9685 board on the I2C
/// bus. Off target the writes go to the simulation outputs instead.
#[cfg(all(target_arch = "arm", target_os = "linux"))]
fn build_servo_outputs(params: &Params) -> Result<[Box<dyn ServoOutput>; 3]> {
    use arm_lib::hw::pca9685::Pca9685Servo;
    use color_eyre::eyre::eyre;
    use pwm_pca9685::{Channel, Pca9685, SlaveAddr};
    use std::cell::RefCell;
    use std::rc::Rc;

    // Prescale for the 50 Hz servo frame:
    // 25 MHz internal oscillator / (4096 counts * 50 Hz) - 1
    const SERVO_PRESCALE: u8 = 121;

    fn channel_from_index(index: u8) -> Option<Channel> {
        match index {
            0 => Some(Channel::C0),
            1 => Some(Channel::C1),
            2 => Some(Channel::C2),
            3 => Some(Channel::C3),
            4 => Some(Channel::C4),
            5 => Some(Channel::C5),
            6 => Some(Channel::C6),
            7 => Some(Channel::C7),
            8 => Some(Channel::C8),
            9 => Some(Channel::C9),
            10 => Some(Channel::C10),
            11 => Some(Channel::C11),
            12 => Some(Channel::C12),
            13 => Some(Channel::C13),
            14 => Some(Channel::C14),
            15 => Some(Channel::C15),
            _ => None,
        }
    }

    let i2c = rppal::i2c::I2c::new().wrap_err("Failed to open the I2C bus")?;
    let driver = Rc::new(RefCell::new(Pca9685::new(i2c, SlaveAddr::default())));

    {
        let mut d = driver.borrow_mut();
        d.set_prescale(SERVO_PRESCALE)
            .map_err(|_| eyre!("Failed to set the PWM prescale"))?;
        d.enable().map_err(|_| eyre!("Failed to enable the PWM driver"))?;
    }

    let shoulder_channel = channel_from_index(params.shoulder.channel)
        .ok_or_else(|| eyre!("No PCA9685 channel with index {}", params.shoulder.channel))?;
    let elbow_channel = channel_from_index(params.elbow.channel)
        .ok_or_else(|| eyre!("No PCA9685 channel with index {}", params.elbow.channel))?;
    let hand_channel = channel_from_index(params.hand.channel)
        .ok_or_else(|| eyre!("No PCA9685 channel with index {}", params.hand.channel))?;

    Ok([
        Box::new(Pca9685Servo::new(driver.clone(), shoulder_channel)),
        Box::new(Pca9685Servo::new(driver.clone(), elbow_channel)),
        Box::new(Pca9685Servo::new(driver, hand_channel)),
    ])
}

/// Build the servo output for each joint.
///
/// Not running on the arm target, so all writes go to the simulation
/// outputs.
#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
fn build_servo_outputs(_params: &Params) -> Result<[Box<dyn ServoOutput>; 3]> {
    use arm_lib::hw::sim::SimServo;

    info!("Not running on the arm target, servo writes go to the simulation outputs");

    Ok([
        Box::new(SimServo::new("shoulder")),
        Box::new(SimServo::new("elbow")),
        Box::new(SimServo::new("hand")),
    ])
}
