//! Realistic content for the dev-server and for tests that want a populated
//! API.
//!
//! Everything is created through [`payloads::APIClient`], so the data goes
//! through the same validation and response shapes as the dashboard.

use crate::TestApp;
use anyhow::Result;
use payloads::{
    Attribute, Benefit, Booking, Faq, Future, Project, RequestOptions, Service,
    Step, User,
    requests::{
        AttributeForm, BenefitForm, BookingForm, FaqForm, FutureForm,
        ImageUpload, ProjectForm, ServiceForm, StepForm, UserForm,
    },
};

pub struct DevDataset {
    pub attributes: Vec<Attribute>,
    pub benefits: Vec<Benefit>,
    pub bookings: Vec<Booking>,
    pub faqs: Vec<Faq>,
    pub futures: Vec<Future>,
    pub projects: Vec<Project>,
    pub services: Vec<Service>,
    pub steps: Vec<Step>,
    pub editor: User,
}

impl DevDataset {
    /// Logs in as the admin and creates a few records of every kind.
    pub async fn create(app: &TestApp) -> Result<Self> {
        app.login_admin().await?;
        let client = &app.client;
        let options = RequestOptions::default();

        tracing::info!("🧩 Creating attributes");
        let mut attributes = Vec::new();
        for (name, value) in [("Speed", "Fast"), ("Support", "24/7")] {
            let form = AttributeForm {
                name: name.into(),
                value: value.into(),
                description: format!("{name} of every delivery"),
            };
            attributes.push(
                client.service::<Attribute>().create(&form, &options).await?.data,
            );
        }

        tracing::info!("🎁 Creating benefits and services");
        let benefit = BenefitForm {
            title: "Responsive design".into(),
            description: "Works on every screen size".into(),
            icon: "device-mobile".into(),
        };
        let benefits =
            vec![client.service::<Benefit>().create(&benefit, &options).await?.data];

        let mut services = Vec::new();
        for (name, features) in [
            ("Web development", "Landing pages\nOnline shops"),
            ("Hosting", "Daily backups\nSSL certificates"),
        ] {
            let form = ServiceForm {
                name: name.into(),
                description: format!("{name} for small businesses"),
                icon: "server".into(),
                features: features.into(),
            };
            services.push(
                client.service::<Service>().create(&form, &options).await?.data,
            );
        }

        tracing::info!("📋 Creating process steps and FAQs");
        let mut steps = Vec::new();
        for (order, title) in ["Discovery", "Design", "Launch"].into_iter().enumerate()
        {
            let form = StepForm {
                title: title.into(),
                description: format!("{title} phase"),
                order: Some(order as i64 + 1),
                icon: String::new(),
            };
            steps.push(client.service::<Step>().create(&form, &options).await?.data);
        }

        let faq = FaqForm {
            question: "How long does a website take?".into(),
            answer: "Usually two to four weeks.".into(),
            category: "General".into(),
        };
        let faqs = vec![client.service::<Faq>().create(&faq, &options).await?.data];

        let future = FutureForm {
            title: "Client portal".into(),
            description: "Track invoices and tickets in one place".into(),
            icon: "sparkles".into(),
            category: "Roadmap".into(),
        };
        let futures =
            vec![client.service::<Future>().create(&future, &options).await?.data];

        tracing::info!("🖼️ Creating a project with an image");
        let project = ProjectForm {
            title: "Bakery storefront".into(),
            description: "Online ordering for a local bakery".into(),
            category: "E-commerce".into(),
            client: "Crumb & Co".into(),
            duration: "3 weeks".into(),
            image: Some(ImageUpload {
                file_name: "storefront.png".into(),
                mime_type: "image/png".into(),
                bytes: vec![0x89, b'P', b'N', b'G'],
            }),
        };
        let projects =
            vec![client.service::<Project>().create(&project, &options).await?.data];

        tracing::info!("📨 Creating a booking and an editor account");
        let booking = BookingForm {
            name: "Jordan Lee".into(),
            phone: "+1 555 0100".into(),
            email: "jordan@example.com".into(),
            service: "Web development".into(),
            message: "Looking for a new site before spring.".into(),
        };
        let bookings =
            vec![client.service::<Booking>().create(&booking, &options).await?.data];

        let editor = UserForm {
            name: "Sam Editor".into(),
            email: "editor@example.com".into(),
            password: "password".into(),
            role: "editor".into(),
        };
        let editor = client.service::<User>().create(&editor, &options).await?.data;

        Ok(Self {
            attributes,
            benefits,
            bookings,
            faqs,
            futures,
            projects,
            services,
            steps,
            editor,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("📊 Seeded content:");
        tracing::info!("   {} attributes", self.attributes.len());
        tracing::info!("   {} benefits", self.benefits.len());
        tracing::info!("   {} bookings", self.bookings.len());
        tracing::info!("   {} faqs", self.faqs.len());
        tracing::info!("   {} futures", self.futures.len());
        tracing::info!("   {} projects", self.projects.len());
        tracing::info!("   {} services", self.services.len());
        tracing::info!("   {} steps", self.steps.len());
        tracing::info!(
            "🔑 Logins: {} / {} (admin), {} / password (editor)",
            crate::store::ADMIN_EMAIL,
            crate::store::ADMIN_PASSWORD,
            self.editor.email
        );
    }
}
