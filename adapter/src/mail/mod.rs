use async_trait::async_trait;
use kernel::{
    model::notification::Notification,
    notifier::{NotificationError, NotificationResult, Notifier},
};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use shared::config::MailConfig;

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    pub fn new(cfg: &MailConfig) -> NotificationResult<Self> {
        // use_tls のときは接続時から TLS、そうでなければ STARTTLS で送る
        let builder = if cfg.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
        };
        let builder = builder.map_err(|e| NotificationError::Compose(e.to_string()))?;

        let transport = builder
            .port(cfg.port)
            .credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: parse_mailbox(&cfg.from)?,
            recipient: parse_mailbox(&cfg.recipient)?,
        })
    }

    fn build_message(&self, notification: Notification) -> NotificationResult<Message> {
        let Notification { subject, body } = notification;
        Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| NotificationError::Compose(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: Notification) -> NotificationResult<()> {
        let message = self.build_message(notification)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;
        tracing::debug!(code = %response.code(), "notification delivered");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> NotificationResult<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotificationError::Compose(format!("invalid mail address {address}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(recipient: &str) -> MailConfig {
        MailConfig {
            host: "smtp.school.test".into(),
            port: 587,
            use_tls: false,
            username: "library".into(),
            password: "secret".into(),
            from: "Library <library@school.test>".into(),
            recipient: recipient.into(),
        }
    }

    #[tokio::test]
    async fn message_is_addressed_to_fixed_mailbox() {
        let notifier = SmtpNotifier::new(&config("loans@school.test")).unwrap();
        let message = notifier
            .build_message(Notification {
                subject: "Book lent: Ficciones (205)".into(),
                body: "The book \"Ficciones\" (code 205) was lent to unknown (HF1234).".into(),
            })
            .unwrap();

        let to: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(to, vec!["loans@school.test".to_string()]);

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Book lent: Ficciones (205)"));
        assert!(raw.contains("HF1234"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_rejected() {
        let res = SmtpNotifier::new(&config("not an address"));
        assert!(matches!(res, Err(NotificationError::Compose(_))));
    }
}
