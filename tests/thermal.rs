use approx::assert_relative_eq;
use lightsail_calculator::constants::STEFAN_BOLTZMANN_W_M2_K4;
use lightsail_calculator::optics::{Layer, Stack};
use lightsail_calculator::thermal::{
    EquilibriumSettings, equilibrium_temperature, power_emitted,
};
use num_complex::Complex64;

fn stack_at(n: f64, k: f64, thickness_m: f64) -> impl Fn(f64) -> Stack {
    move |_wavelength| Stack::new(vec![Layer::new(Complex64::new(n, k), -thickness_m)])
}

#[test]
fn equilibrium_balances_emitted_against_absorbed() {
    let stack_at = stack_at(1.5, 0.1, 1.0e-6);
    let settings = EquilibriumSettings::default();
    let absorbed_w_m2 = 5.0e3;

    let temperature_k =
        equilibrium_temperature(&stack_at, absorbed_w_m2, &settings).expect("equilibrium");
    let emitted_w_m2 =
        power_emitted(&stack_at, temperature_k, &settings.emission).expect("emitted");

    // The root is found to the Brent temperature tolerance, so the balance
    // closes to the local slope of the emission curve, well under 0.1%.
    assert_relative_eq!(emitted_w_m2, absorbed_w_m2, max_relative = 1e-3);
}

#[test]
fn opaque_index_matched_face_runs_near_the_blackbody_limit() {
    // k = 0.3 over 20 µm is optically thick across the band and n = 1 kills
    // the front-surface reflection, so the equilibrium temperature should
    // land just above the two-face blackbody estimate (the 1-25 µm band
    // misses some of the Planck tail).
    let stack_at = stack_at(1.0, 0.3, 20.0e-6);
    let absorbed_w_m2 = 5.0e3;
    let blackbody_k = (absorbed_w_m2 / (2.0 * STEFAN_BOLTZMANN_W_M2_K4)).powf(0.25);

    let temperature_k =
        equilibrium_temperature(&stack_at, absorbed_w_m2, &EquilibriumSettings::default())
            .expect("equilibrium");

    assert!(temperature_k > 0.98 * blackbody_k, "{temperature_k} vs {blackbody_k}");
    assert!(temperature_k < 1.25 * blackbody_k, "{temperature_k} vs {blackbody_k}");
}

#[test]
fn weak_absorber_runs_much_hotter_than_a_blackbody() {
    let stack_at = stack_at(1.45, 1.0e-3, 1.0e-6);
    let absorbed_w_m2 = 1.0e3;
    let blackbody_k = (absorbed_w_m2 / (2.0 * STEFAN_BOLTZMANN_W_M2_K4)).powf(0.25);

    let temperature_k =
        equilibrium_temperature(&stack_at, absorbed_w_m2, &EquilibriumSettings::default())
            .expect("equilibrium");

    // Low emissivity forces the bracket to expand past the blackbody seed.
    assert!(temperature_k > 1.5 * blackbody_k, "{temperature_k} vs {blackbody_k}");
}

#[test]
fn equilibrium_temperature_rises_with_absorbed_power() {
    let stack_at = stack_at(1.5, 0.1, 1.0e-6);
    let settings = EquilibriumSettings::default();
    let cool = equilibrium_temperature(&stack_at, 1.0e3, &settings).expect("cool");
    let hot = equilibrium_temperature(&stack_at, 1.0e4, &settings).expect("hot");
    assert!(hot > cool);
}
