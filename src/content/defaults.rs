//! Built-in template used to seed new drafts and as the lenient-read fallback.

use super::types::{ContactData, FallbackContent, FaqItem, FeatureItem, HeroSlide, LandingData, LandingSeo};

const WHATSAPP_INFO_HREF: &str =
    "https://wa.me/51990814630?text=Hola%2C%20quiero%20informacion%20del%20Proyecto%20Urb.%20Santa%20Beatriz.";

/// Contact details used when published content leaves them blank.
pub struct SiteContact {
    pub phone_intl: &'static str,
    pub email: &'static str,
    pub address: &'static str,
}

pub const SITE_CONTACT: SiteContact = SiteContact {
    phone_intl: "+51990814630",
    email: "orbezog@hotmail.com",
    address: "Jr. Ayacucho 599",
};

pub const FALLBACK_CONTENT: FallbackContent = FallbackContent {
    title: "Contenido en actualizacion",
    description: "Estamos preparando la informacion oficial del proyecto. Contactanos para recibir detalle actualizado.",
    cta_text: "Contactar por WhatsApp",
    cta_href: "https://wa.me/51990814630?text=Hola%2C%20quiero%20informacion%20actualizada%20del%20proyecto.",
};

fn feature(title: &str, description: &str) -> FeatureItem {
    FeatureItem {
        title: title.to_string(),
        description: description.to_string(),
        icon_key: None,
    }
}

fn faq(question: &str, answer: &str) -> FaqItem {
    FaqItem {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

pub fn default_landing_data() -> LandingData {
    LandingData {
        hero_slider: vec![HeroSlide {
            title: "Proyecto Urb. Santa Beatriz".to_string(),
            subtitle: "Lotes de 150 m2 a 15 min del centro de Chanchamayo".to_string(),
            cta_text: "WhatsApp".to_string(),
            cta_href: WHATSAPP_INFO_HREF.to_string(),
            image_url: None,
        }],
        features: vec![
            feature("Contrato notarial", "Formalizacion segura de la compra."),
            feature("Papeles en regla", "Documentacion validada para la operacion."),
            feature("Servicios basicos", "Luz, agua y alcantarillado."),
            feature("Pistas y veredas", "Urbanizacion con accesos en desarrollo."),
        ],
        faq: vec![
            faq(
                "Los lotes tienen documentacion en regla?",
                "Si. El proyecto contempla documentacion y formalizacion notarial.",
            ),
            faq(
                "Como puedo agendar una visita?",
                "Puedes coordinar por WhatsApp, llamada telefonica o correo.",
            ),
        ],
        contact: ContactData {
            phone: SITE_CONTACT.phone_intl.to_string(),
            whatsapp: WHATSAPP_INFO_HREF.to_string(),
            email: SITE_CONTACT.email.to_string(),
            address: SITE_CONTACT.address.to_string(),
        },
        header: None,
    }
}

pub fn default_landing_seo() -> LandingSeo {
    LandingSeo {
        title: "Power Amazonica | Proyecto Santa Beatriz".to_string(),
        description: "Conoce el Proyecto Urb. Santa Beatriz de Power Amazonica: lotes de 150 m2 en Chanchamayo."
            .to_string(),
        og_title: "Power Amazonica | Proyecto Santa Beatriz".to_string(),
        og_description: "Lotes de 150 m2 en Chanchamayo, con papeles en regla y facilidades de pago.".to_string(),
        og_image: None,
    }
}
