use chargestate_equations::app::run;

fn main() -> color_eyre::Result<()> {
    run()
}
