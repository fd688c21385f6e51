use crate::{
    cli::movies,
    error, info,
    forms::{LoginForm, RegisterForm, SubmitError},
    management::session,
    route::{App, Route},
    success, utils, warning,
};

pub async fn login(app: &mut App, email: Option<String>) {
    if app.store().is_authenticated() {
        info!("Already logged in; signing in again replaces the current session");
    }

    let email = match email {
        Some(email) => email,
        None => read_line("Email"),
    };
    let password = read_password("Password");

    let mut form = LoginForm::new(email, password);
    let pb = utils::spinner("Logging in...");
    let (store, client) = app.parts();
    let outcome = form.submit(store, client).await;
    pb.finish_and_clear();

    match outcome {
        Ok(route) => {
            success!("Logged in");
            follow(app, route).await;
        }
        Err(e) => fail(e),
    }
}

pub async fn register(app: &mut App, name: Option<String>, email: Option<String>) {
    let name = match name {
        Some(name) => name,
        None => read_line("Name"),
    };
    let email = match email {
        Some(email) => email,
        None => read_line("Email"),
    };
    let password = read_password("Password");
    let confirm_password = read_password("Confirm password");

    let mut form = RegisterForm::new(name, email, password, confirm_password);
    let pb = utils::spinner("Creating account...");
    let (store, client) = app.parts();
    let outcome = form.submit(store, client).await;
    pb.finish_and_clear();

    match outcome {
        Ok(route) => {
            success!("Account created, you are logged in");
            follow(app, route).await;
        }
        Err(e) => fail(e),
    }
}

pub async fn logout(app: &mut App) {
    if !app.store().is_authenticated() {
        info!("Not logged in");
    }

    let (store, client) = app.parts();
    session::logout(store, client).await;
    success!("Logged out");
}

pub fn status(app: &App) {
    if app.store().is_authenticated() {
        success!("Logged in");
    } else {
        warning!("Not logged in");
    }

    let config = app.config();
    info!("API: {}", config.api_url);
    info!("Cookie jar: {}", config.cookie_path().display());
}

/// Forms only ever send the user home after a successful submit. The new
/// session is saved first; the listing may exit on failure.
async fn follow(app: &mut App, route: Route) {
    if let Err(e) = app.persist_cookies().await {
        warning!("Cannot save session. Err: {}", e);
    }

    match route {
        Route::Home => movies::home(app).await,
        other => info!("Continue with moviefan open {}", other),
    }
}

fn fail(err: SubmitError) -> ! {
    match err {
        SubmitError::Invalid(errors) => {
            movies::report_errors(&errors);
            error!("Nothing was submitted");
        }
        SubmitError::Rejected { message, cause } => {
            tracing::debug!(error = %cause, "submit rejected");
            error!("{}", message);
        }
    }
}

fn read_line(label: &str) -> String {
    match utils::prompt(label) {
        Ok(value) => value,
        Err(e) => error!("Cannot read input. Err: {}", e),
    }
}

fn read_password(label: &str) -> String {
    match utils::prompt_password(label) {
        Ok(value) => value,
        Err(e) => error!("Cannot read password. Err: {}", e),
    }
}
