//! User-facing texts.
//!
//! The bot speaks Russian, matching the `lang=ru` answers of the geolocation
//! service. Texts containing markup are sent with HTML parse mode.

// Keyboard buttons
pub const BUTTON_OWN_IP: &str = "🌐 Отправить свой IP";
pub const BUTTON_HELP: &str = "❓ Как использовать?";

pub const GREETING: &str = "👋 Привет! Я помогу определить геолокацию по IP-адресу.\n\n\
Нажми кнопку ниже или отправь любой публичный IP (например, <code>8.8.8.8</code>).";

pub const HELP: &str = "📘 <b>Как пользоваться ботом:</b>\n\n\
1️⃣ Отправьте любой публичный IPv4-адрес, например: <code>8.8.8.8</code>\n\
2️⃣ Бот покажет страну, город и координаты\n\
3️⃣ Нажмите на ссылку с координатами — откроется Google Карты\n\n\
🔒 Приватные IP (вроде 192.168.0.1) не имеют геолокации.";

// Rejections
pub const INVALID_IPV4: &str = "❌ Введите корректный IPv4-адрес.";
pub const PRIVATE_IPV4: &str =
    "🔒 Это приватный (внутренний) IP-адрес. У него нет внешней геолокации.";

// Progress placeholders
pub const SEARCHING: &str = "🔍 Определяем местоположение...";

pub fn searching_own_ip(ip: &str) -> String {
    format!("🔍 Определяем местоположение вашего IP: <code>{ip}</code>...")
}

// Lookup failures
pub const CONNECTION_FAILURE: &str = "❌ Ошибка соединения с сервисом определения геолокации.";
pub const PROCESSING_FAILURE: &str = "❌ Произошла ошибка при обработке запроса.";
pub const SERVICE_FAILURE_PREFIX: &str = "❌ Не удалось определить местоположение: ";
pub const UNKNOWN_ERROR: &str = "Неизвестная ошибка";

// Own-IP failures
pub const OWN_IP_UNAVAILABLE: &str = "❌ Не удалось определить ваш IP.";
pub const OWN_IP_FAILURE: &str = "❌ Ошибка при определении вашего IP.";

// Delivery failure fallback
pub const DISPLAY_FAILURE: &str = "❌ Не удалось отобразить результат.";

// Lookup result labels
pub const RESULT_HEADER: &str = "📍 Информация по IP:";
pub const LABEL_COUNTRY: &str = "🌍 Страна:";
pub const LABEL_CITY: &str = "🏙 Город:";
pub const LABEL_REGION: &str = "📍 Регион:";
pub const LABEL_COORDINATES: &str = "🗺 Координаты:";
pub const NOT_SPECIFIED: &str = "Не указано";
pub const NO_DATA: &str = "Нет данных";
