#[cfg(feature = "ssr")]
mod server {
    use anyhow::Context;
    use app_shell::DashboardConfig;
    use axum::Router;
    use leptos::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::services::ServeDir;
    use ui::App;

    pub async fn run() -> anyhow::Result<()> {
        let config = DashboardConfig::load_default();
        let conf = get_configuration(None).await?;
        let mut leptos_options = conf.leptos_options;
        leptos_options.site_addr = config
            .site_addr
            .parse()
            .with_context(|| format!("invalid site_addr {:?}", config.site_addr))?;
        let addr = leptos_options.site_addr;
        let pkg_dir = format!("{}/{}", leptos_options.site_root, leptos_options.site_pkg_dir);
        let routes = generate_route_list(App);

        let app = Router::new()
            .leptos_routes(&leptos_options, routes, App)
            .nest_service(&format!("/{}", leptos_options.site_pkg_dir), ServeDir::new(pkg_dir))
            .with_state(leptos_options);

        log::info!("dashboard listening on http://{addr}");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {addr}"))?;
        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = server::run().await {
        log::error!("server error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(all(not(feature = "ssr"), feature = "csr", target_arch = "wasm32"))]
fn main() {
    ui::start();
}

#[cfg(all(not(feature = "ssr"), not(all(feature = "csr", target_arch = "wasm32"))))]
fn main() {}
