use coherent::utils::{bounds2, normalize2};
use coherent::{Billow, PlaneBuilder, RidgedMulti, ScaleBias, Select, Turbulence};

const SHADES: &[u8] = b" .:-=+*#%@";

fn main() -> coherent::Result<()> {
    // Two billow fields, picked between by a ridged control with a soft edge
    let mut large = Billow::new();
    large.set_frequency(4.0)?;
    large.set_octave_count(1.0)?;

    let mut small_base = Billow::new();
    small_base.set_seed(1);
    small_base.set_frequency(24.0)?;
    small_base.set_octave_count(1.0)?;
    let mut small = ScaleBias::new();
    small.set_source_module(0, &small_base)?;
    small.set_scale(0.5)?;
    small.set_bias(-0.5)?;

    let mut control = RidgedMulti::new();
    control.set_frequency(2.0)?;
    control.set_octave_count(3.0)?;

    let mut chooser = Select::new();
    chooser.set_source_module(0, &large)?;
    chooser.set_source_module(1, &small)?;
    chooser.set_control_module(&control);
    chooser.set_bounds(-0.375, 0.375)?;
    chooser.set_edge_falloff(0.25)?;

    let mut slime = Turbulence::new();
    slime.set_source_module(0, &chooser)?;
    slime.set_seed(2);
    slime.set_frequency(8.0)?;
    slime.set_power(1.0 / 32.0)?;
    slime.set_roughness(2)?;

    let mut plane = PlaneBuilder::new();
    plane.set_source_module(&slime);
    plane.set_dest_size(64, 32);
    plane.enable_seamless(true);
    let mut map = plane.build()?;

    if let Some((min, max)) = bounds2(&map) {
        println!("raw range: {min:.3} .. {max:.3}");
    }
    normalize2(&mut map);

    // Print the map as ASCII shades
    for row in &map {
        let line: String = row
            .iter()
            .map(|&v| {
                let shade = (v * (SHADES.len() - 1) as f32).round() as usize;
                SHADES[shade.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{line}");
    }
    Ok(())
}
