//! Operator- and participant-facing status texts.

pub const LOGGING_IN: &str = "Giriş yapılıyor…";
pub const LOGIN_OK: &str = "Giriş başarılı.";
pub const LOGGED_OUT: &str = "Çıkış yapıldı.";
pub const CREATING_STUDY: &str = "Study oluşturuluyor…";
pub const DELETING_STUDY: &str = "Study siliniyor…";
pub const STUDY_DELETED: &str = "Study silindi.";
pub const CREATING_INSTRUMENT: &str = "Instrument oluşturuluyor…";
pub const DELETING_INSTRUMENT: &str = "Instrument siliniyor…";
pub const INSTRUMENT_DELETED: &str = "Instrument silindi.";
pub const CREATING_SESSION: &str = "Session oluşturuluyor…";
pub const LINK_COPIED: &str = "Link panoya kopyalandı.";
pub const SELECT_STUDY_FIRST: &str = "Önce bir study seçmelisin.";
pub const CANCELLED: &str = "İşlem iptal edildi.";

pub const CONFIRM_DELETE_INSTRUMENT: &str =
    "Instrument silinsin mi? Bağlı session ve yanıtlar backend tarafında silinmez.";
pub const CONFIRM_DELETE_STUDY: &str =
    "Study silinsin mi? Bağlı instrument, session ve yanıtlar da silinir.";

pub const NO_TOKEN_SAVE: &str = "Token yok. `olcme auth login` ile tekrar giriş yap.";
pub const NO_TOKEN: &str = "Token yok.";
pub const INVALID_JSON: &str = "JSON hatalı. Düzelttikten sonra kaydet.";
pub const SAVING: &str = "Kaydediliyor…";
pub const SAVED: &str = "Kaydedildi.";
pub const LOADING_RESULTS: &str = "Sonuçlar yükleniyor…";
pub const NO_FORM: &str = "Bu task tipi için form yok (şimdilik). JSON’dan düzenleyebilirsin.";

pub const SESSION_LOAD_FAILED: &str =
    "Session okunamadı (API erişimi veya session_id hatalı olabilir).";
pub const RESPONSE_FAILED: &str = "Yanıt kaydedilemedi.";
pub const COMPLETED: &str = "Teşekkürler! Anket tamamlandı.";
pub const NO_TASKS: &str = "Bu session’da task bulunamadı.";
pub const MALFORMED_TASK: &str = "Bu task okunamadı; instrument spec’i hatalı.";
pub const UNSUPPORTED_TASK: &str = "Şimdilik sadece paired_comparison destekleniyor.";

#[must_use]
pub fn login_failed(error: &impl std::fmt::Display) -> String {
    format!("Giriş hatası: {error}")
}

#[must_use]
pub fn failed(error: &impl std::fmt::Display) -> String {
    format!("Hata: {error}")
}

#[must_use]
pub fn study_created(id: i64) -> String {
    format!("Study oluşturuldu (id={id}).")
}

#[must_use]
pub fn instrument_created(id: i64) -> String {
    format!("Instrument oluşturuldu (id={id}).")
}

#[must_use]
pub fn session_ready(id: i64) -> String {
    format!("Session hazır (session_id={id}). Link kopyalayabilirsin.")
}
