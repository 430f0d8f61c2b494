use {
    breeze::app::BreezeApp,
    color_eyre::{Section, eyre::Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    let Some(app) = BreezeApp::init()? else {
        return Ok(());
    };

    app.run()
        .await
        .suggestion("run with BREEZE_LOGGING__LEVEL=debug for more detail")
}
