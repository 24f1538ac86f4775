//! The home view: users the session user is not yet connected to.
//!
//! The view subscribes to the session on construction but does no I/O until
//! [`HomeView::init`] runs. `init` waits for a confirmed session user before
//! fetching, so a request is never sent without an email.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::client::GraphbookApi;
use crate::error::{GraphbookError, Result};
use crate::session::SessionService;
use crate::types::{Post, Student};

pub struct HomeView {
    api: Arc<dyn GraphbookApi>,
    user_rx: watch::Receiver<Option<Student>>,
    token_rx: watch::Receiver<bool>,
    session_timeout: Duration,
    current_user: Option<Student>,
    login_token: bool,
    users: Option<Vec<Student>>,
}

impl HomeView {
    pub fn new(
        api: Arc<dyn GraphbookApi>,
        session: &SessionService,
        session_timeout: Duration,
    ) -> Self {
        Self {
            api,
            user_rx: session.subscribe_user(),
            token_rx: session.subscribe_token(),
            session_timeout,
            current_user: None,
            login_token: false,
            users: None,
        }
    }

    /// Wait for a session user, then fetch that user's non-connections.
    pub async fn init(&mut self) -> Result<&[Student]> {
        self.sync_session();

        if self.current_user.is_none() {
            debug!(timeout = ?self.session_timeout, "waiting for session user");
            let received = self.user_rx.wait_for(Option::is_some);
            match tokio::time::timeout(self.session_timeout, received).await {
                Ok(Ok(_)) => {}
                Ok(Err(_)) => return Err(GraphbookError::SessionClosed),
                Err(_) => return Err(GraphbookError::SessionTimeout(self.session_timeout)),
            }
            self.sync_session();
        }

        self.fetch_non_connections().await?;
        debug!(user = ?self.current_user, login_token = self.login_token, "home view initialized");

        Ok(self.users())
    }

    /// Fetch non-connections for the latest session user, replacing the
    /// previous list. Every call hits the backend.
    pub async fn fetch_non_connections(&mut self) -> Result<&[Student]> {
        self.sync_session();

        let email = self
            .current_email()
            .ok_or(GraphbookError::NoSessionUser)?
            .to_string();

        debug!(%email, "fetching non-connections");
        let users = self.api.non_connections(&email).await?;
        info!(count = users.len(), "fetched non-connections");

        Ok(self.users.insert(users).as_slice())
    }

    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.api.posts().await
    }

    fn sync_session(&mut self) {
        self.current_user = self.user_rx.borrow_and_update().clone();
        self.login_token = *self.token_rx.borrow_and_update();
    }

    pub fn users(&self) -> &[Student] {
        self.users.as_deref().unwrap_or_default()
    }

    #[cfg(test)]
    fn has_fetched(&self) -> bool {
        self.users.is_some()
    }

    pub fn current_user(&self) -> Option<&Student> {
        self.current_user.as_ref()
    }

    pub fn current_email(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.email_address.as_str())
    }

    pub fn login_token(&self) -> bool {
        self.login_token
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct MockApi {
        responses: Mutex<VecDeque<Result<Vec<Student>>>>,
        requested: Mutex<Vec<String>>,
        posts: Vec<Post>,
    }

    impl MockApi {
        fn new(responses: Vec<Result<Vec<Student>>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
                posts: Vec::new(),
            })
        }

        fn with_posts(posts: Vec<Post>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::new()),
                requested: Mutex::new(Vec::new()),
                posts,
            })
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphbookApi for MockApi {
        async fn non_connections(&self, email: &str) -> Result<Vec<Student>> {
            self.requested.lock().unwrap().push(email.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn posts(&self) -> Result<Vec<Post>> {
            Ok(self.posts.clone())
        }
    }

    fn student(id: i64, email: &str) -> Student {
        Student {
            student_id: id,
            ..Student::with_email(email, Some("First"), Some("Last"))
        }
    }

    fn view(api: Arc<MockApi>, session: &SessionService) -> HomeView {
        HomeView::new(api, session, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_construction_does_no_io() {
        let api = MockApi::new(vec![]);
        let session = SessionService::new();
        session.login(student(1, "ada@mail.mcgill.ca"));

        let view = view(api.clone(), &session);
        assert!(api.requested().is_empty());
        assert!(!view.has_fetched());
        assert!(view.current_user().is_none());
    }

    #[tokio::test]
    async fn test_init_sends_session_email() {
        let api = MockApi::new(vec![Ok(vec![student(2, "bob@mail.mcgill.ca")])]);
        let session = SessionService::new();
        session.login(student(1, "ada@mail.mcgill.ca"));

        let mut view = view(api.clone(), &session);
        let users = view.init().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email_address, "bob@mail.mcgill.ca");
        assert_eq!(api.requested(), vec!["ada@mail.mcgill.ca".to_string()]);
        assert_eq!(view.current_email(), Some("ada@mail.mcgill.ca"));
        assert!(view.login_token());
    }

    #[tokio::test]
    async fn test_fetch_without_session_user_fails() {
        let api = MockApi::new(vec![]);
        let session = SessionService::new();

        let mut view = view(api.clone(), &session);
        let result = view.fetch_non_connections().await;
        assert!(matches!(result, Err(GraphbookError::NoSessionUser)));
        assert!(api.requested().is_empty());
        assert!(!view.has_fetched());
    }

    #[tokio::test]
    async fn test_fetch_replaces_previous_list() {
        let api = MockApi::new(vec![
            Ok(vec![student(2, "bob@mail.mcgill.ca"), student(3, "cy@mail.mcgill.ca")]),
            Ok(vec![student(4, "di@mail.mcgill.ca")]),
        ]);
        let session = SessionService::new();
        session.login(student(1, "ada@mail.mcgill.ca"));

        let mut view = view(api.clone(), &session);
        assert_eq!(view.fetch_non_connections().await.unwrap().len(), 2);

        let users = view.fetch_non_connections().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].student_id, 4);
        assert_eq!(api.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let api = MockApi::new(vec![
            Ok(vec![student(2, "bob@mail.mcgill.ca")]),
            Err(GraphbookError::ApiError {
                status: 500,
                message: "boom".to_string(),
            }),
        ]);
        let session = SessionService::new();
        session.login(student(1, "ada@mail.mcgill.ca"));

        let mut view = view(api, &session);
        view.fetch_non_connections().await.unwrap();

        let result = view.fetch_non_connections().await;
        assert!(matches!(result, Err(GraphbookError::ApiError { status: 500, .. })));
        assert_eq!(view.users().len(), 1);
        assert_eq!(view.users()[0].student_id, 2);
    }

    #[tokio::test]
    async fn test_fetch_follows_latest_session_user() {
        let api = MockApi::new(vec![]);
        let session = SessionService::new();
        session.login(student(1, "ada@mail.mcgill.ca"));

        let mut view = view(api.clone(), &session);
        view.fetch_non_connections().await.unwrap();

        session.login(student(5, "eve@mail.mcgill.ca"));
        view.fetch_non_connections().await.unwrap();

        assert_eq!(
            api.requested(),
            vec![
                "ada@mail.mcgill.ca".to_string(),
                "eve@mail.mcgill.ca".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_after_logout_keeps_list() {
        let api = MockApi::new(vec![Ok(vec![student(2, "bob@mail.mcgill.ca")])]);
        let session = SessionService::new();
        session.login(student(1, "ada@mail.mcgill.ca"));

        let mut view = view(api.clone(), &session);
        view.fetch_non_connections().await.unwrap();

        session.logout();
        let result = view.fetch_non_connections().await;
        assert!(matches!(result, Err(GraphbookError::NoSessionUser)));
        assert_eq!(view.users().len(), 1);
        assert!(!view.login_token());
        assert_eq!(api.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_init_waits_for_late_session_user() {
        let api = MockApi::new(vec![Ok(vec![student(2, "bob@mail.mcgill.ca")])]);
        let session = SessionService::new();
        let mut view = view(api.clone(), &session);

        let login = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.login(student(1, "ada@mail.mcgill.ca"));
        };
        let (result, ()) = tokio::join!(view.init(), login);

        assert_eq!(result.unwrap().len(), 1);
        assert_eq!(api.requested(), vec!["ada@mail.mcgill.ca".to_string()]);
    }

    #[tokio::test]
    async fn test_init_times_out_without_session_user() {
        let api = MockApi::new(vec![]);
        let session = SessionService::new();
        let mut view = HomeView::new(api.clone(), &session, Duration::from_millis(20));

        let result = view.init().await;
        assert!(matches!(result, Err(GraphbookError::SessionTimeout(_))));
        assert!(api.requested().is_empty());
    }

    #[tokio::test]
    async fn test_init_fails_when_session_closes() {
        let api = MockApi::new(vec![]);
        let session = SessionService::new();
        let mut view = view(api.clone(), &session);
        drop(session);

        let result = view.init().await;
        assert!(matches!(result, Err(GraphbookError::SessionClosed)));
        assert!(api.requested().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_posts_is_pass_through() {
        let posts = vec![
            Post {
                user_id: 1,
                id: 1,
                title: "sunt aut facere".to_string(),
                body: "quia et suscipit".to_string(),
            },
            Post {
                user_id: 1,
                id: 2,
                title: "qui est esse".to_string(),
                body: "est rerum tempore".to_string(),
            },
        ];
        let api = MockApi::with_posts(posts.clone());
        let session = SessionService::new();

        let view = view(api.clone(), &session);
        assert_eq!(view.fetch_posts().await.unwrap(), posts);
        assert!(!view.has_fetched());
        assert!(api.requested().is_empty());
    }
}
