use iced::{
    Element, Length, Task,
    widget::{button, column, container, row, text, text_input},
};
use tracing::warn;

use crate::{
    core::{
        AppState, LoginForm, RegisterForm, User,
        db::{SessionGate, SessionRepository},
    },
    gui::{
        screens::{ParentMessage, Route, Screen, ScreenMessage, navigate},
        widgets::{APP_NAME, notice},
    },
};

#[derive(Debug, Clone)]
pub struct LoginScreen {
    registering: bool,
    show_password: bool,
    login: LoginForm,
    register: RegisterForm,
    notice: Option<String>,
    submitting: bool,
}

#[derive(Debug, Clone)]
pub enum LoginMessage {
    Activated(Result<SessionGate, String>),
    ToggleMode,
    ToggleShowPassword,
    LoginEmail(String),
    LoginPassword(String),
    RegisterName(String),
    RegisterEmail(String),
    RegisterPassword(String),
    RegisterConfirm(String),
    Submit,
    Saved(Result<User, String>),
    DismissNotice,
}

fn msg(message: LoginMessage) -> ScreenMessage<LoginScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl LoginScreen {
    /// A user who is already signed in skips straight to the dashboard.
    pub fn open(register: bool, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let store = state.store();
        (
            Self {
                registering: register,
                show_password: false,
                login: LoginForm::default(),
                register: RegisterForm::default(),
                notice: None,
                submitting: false,
            },
            Task::perform(
                async move {
                    SessionGate::check(&*store)
                        .await
                        .map_err(|e| format!("{e:#}"))
                },
                |gate| msg(LoginMessage::Activated(gate)),
            ),
        )
    }

    fn submit(&mut self, state: &AppState) -> Task<ScreenMessage<Self>> {
        let validated = if self.registering {
            self.register.validate()
        } else {
            self.login.validate()
        };
        let user = match validated {
            Ok(user) => user,
            Err(e) => {
                self.notice = Some(e.to_string());
                return Task::none();
            }
        };

        self.submitting = true;
        let store = state.store();
        Task::perform(
            async move {
                let saved = store.save_user(&user).await;
                saved.map(|()| user).map_err(|e| format!("{e:#}"))
            },
            |saved| msg(LoginMessage::Saved(saved)),
        )
    }

    fn form(&self) -> Element<'_, ScreenMessage<Self>> {
        let secure = !self.show_password;
        let fields = if self.registering {
            column![
                text_input("Full name", &self.register.name)
                    .on_input(|v| msg(LoginMessage::RegisterName(v))),
                text_input("Email", &self.register.email)
                    .on_input(|v| msg(LoginMessage::RegisterEmail(v))),
                text_input("Password", &self.register.password)
                    .on_input(|v| msg(LoginMessage::RegisterPassword(v)))
                    .secure(secure),
                text_input("Confirm password", &self.register.confirm_password)
                    .on_input(|v| msg(LoginMessage::RegisterConfirm(v)))
                    .on_submit(msg(LoginMessage::Submit))
                    .secure(secure),
            ]
        } else {
            column![
                text_input("Email", &self.login.email)
                    .on_input(|v| msg(LoginMessage::LoginEmail(v))),
                text_input("Password", &self.login.password)
                    .on_input(|v| msg(LoginMessage::LoginPassword(v)))
                    .on_submit(msg(LoginMessage::Submit))
                    .secure(secure),
            ]
        };

        let submit_label = if self.registering { "Create Account" } else { "Sign In" };
        let toggle_label = if self.registering {
            "Already have an account? Sign in"
        } else {
            "Don't have an account? Register"
        };

        column![
            fields.spacing(12),
            row![
                button(text(if self.show_password { "Hide password" } else { "Show password" }))
                    .on_press(msg(LoginMessage::ToggleShowPassword))
                    .style(button::text),
            ],
            button(text(submit_label))
                .on_press_maybe((!self.submitting).then(|| msg(LoginMessage::Submit)))
                .width(Length::Fill)
                .style(button::primary),
            button(text(toggle_label))
                .on_press(msg(LoginMessage::ToggleMode))
                .style(button::text),
        ]
        .spacing(16)
        .into()
    }
}

impl Screen for LoginScreen {
    type Message = LoginMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let (heading, subheading) = if self.registering {
            ("Create an Account", "Sign up to access all premium features")
        } else {
            ("Welcome Back", "Sign in to continue to your account")
        };

        let mut card = column![
            text(APP_NAME).size(16),
            text(heading).size(28),
            text(subheading),
        ]
        .spacing(8);

        if let Some(message) = &self.notice {
            card = card.push(notice(message, msg(LoginMessage::DismissNotice)));
        }
        card = card.push(self.form());

        container(
            container(card.spacing(20))
                .padding(32)
                .max_width(420)
                .style(container::bordered_box),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoginMessage::Activated(Ok(gate @ SessionGate::Allowed(_))) => {
                state.apply_session(&gate);
                navigate(Route::Dashboard)
            }
            LoginMessage::Activated(Ok(SessionGate::Redirect)) => Task::none(),
            LoginMessage::Activated(Err(e)) => {
                warn!(error = %e, "could not read session");
                Task::none()
            }
            LoginMessage::ToggleMode => {
                self.registering = !self.registering;
                self.notice = None;
                Task::none()
            }
            LoginMessage::ToggleShowPassword => {
                self.show_password = !self.show_password;
                Task::none()
            }
            LoginMessage::LoginEmail(v) => {
                self.login.email = v;
                Task::none()
            }
            LoginMessage::LoginPassword(v) => {
                self.login.password = v;
                Task::none()
            }
            LoginMessage::RegisterName(v) => {
                self.register.name = v;
                Task::none()
            }
            LoginMessage::RegisterEmail(v) => {
                self.register.email = v;
                Task::none()
            }
            LoginMessage::RegisterPassword(v) => {
                self.register.password = v;
                Task::none()
            }
            LoginMessage::RegisterConfirm(v) => {
                self.register.confirm_password = v;
                Task::none()
            }
            LoginMessage::Submit => self.submit(state),
            LoginMessage::Saved(Ok(user)) => {
                self.submitting = false;
                state.set_user(user);
                navigate(Route::Dashboard)
            }
            LoginMessage::Saved(Err(e)) => {
                self.submitting = false;
                warn!(error = %e, "could not store user");
                self.notice = Some("Could not sign you in, please try again".to_string());
                Task::none()
            }
            LoginMessage::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{config::Config, core::db::SqliteStore};

    fn jane() -> User {
        User {
            name: "jane".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_mode_is_kept_for_signed_out_user() -> anyhow::Result<()> {
        let store = Arc::new(SqliteStore::in_memory().await?);
        let mut state = AppState::new(store.clone(), Config::default());

        let (mut screen, _) = LoginScreen::open(true, &state);
        assert!(screen.registering);

        let gate = SessionGate::check(&*store).await?;
        let _ = screen.update(LoginMessage::Activated(Ok(gate)), &mut state);
        assert!(screen.registering);
        assert!(state.user().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_signed_in_user_is_taken_over() -> anyhow::Result<()> {
        let store = Arc::new(SqliteStore::in_memory().await?);
        store.save_user(&jane()).await?;
        let mut state = AppState::new(store.clone(), Config::default());

        let (mut screen, _) = LoginScreen::open(false, &state);
        let gate = SessionGate::check(&*store).await?;
        let _ = screen.update(LoginMessage::Activated(Ok(gate)), &mut state);

        assert_eq!(state.user(), Some(&jane()));
        Ok(())
    }

    #[tokio::test]
    async fn test_mismatched_passwords_show_notice() -> anyhow::Result<()> {
        let store = Arc::new(SqliteStore::in_memory().await?);
        let mut state = AppState::new(store.clone(), Config::default());
        let (mut screen, _) = LoginScreen::open(true, &state);
        screen.register = RegisterForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "a".to_string(),
            confirm_password: "b".to_string(),
        };

        let _ = screen.update(LoginMessage::Submit, &mut state);

        assert_eq!(screen.notice.as_deref(), Some("Passwords do not match"));
        assert!(!screen.submitting);
        assert_eq!(store.current_user().await?, None);
        Ok(())
    }
}
