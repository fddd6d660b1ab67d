//! VCard Repository
//!
//! A card is spread over six tables keyed by `full_names.vcard_id`. Writes
//! happen in one transaction; the work address row is only written when
//! at least one address field has content.

use shared::models::{ContactData, ContactField, VCardRecord};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::utils::ErrorCode;

/// Flat join of every table belonging to one card
#[derive(Debug, sqlx::FromRow)]
struct VCardRow {
    vcard_id: i64,
    vcard_fname: String,
    vcard_mname: Option<String>,
    vcard_lname: String,
    vcard_suffix: Option<i64>,
    created_at: i64,
    con_email: Option<String>,
    con_phone: Option<String>,
    img_photo: Option<String>,
    img_logo: Option<String>,
    soc_linkedin: Option<String>,
    soc_twitter: Option<String>,
    soc_facebook: Option<String>,
    soc_instagram: Option<String>,
    soc_youtube: Option<String>,
    soc_customlink: Option<String>,
    wrk_org: Option<String>,
    wkr_email: Option<String>,
    wrk_title: Option<String>,
    wrk_role: Option<String>,
    wrk_url: Option<String>,
    wa_street: Option<String>,
    wa_city: Option<String>,
    wa_state: Option<String>,
    wa_postal_code: Option<String>,
    wa_country: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<VCardRow> for VCardRecord {
    fn from(row: VCardRow) -> Self {
        let contact = ContactData {
            vcard_fname: present(Some(row.vcard_fname)),
            vcard_mname: present(row.vcard_mname),
            vcard_lname: present(Some(row.vcard_lname)),
            vcard_suffix: row.vcard_suffix,
            con_email: present(row.con_email),
            con_phone: present(row.con_phone),
            img_photo: present(row.img_photo),
            img_logo: present(row.img_logo),
            soc_linkedin: present(row.soc_linkedin),
            soc_twitter: present(row.soc_twitter),
            soc_facebook: present(row.soc_facebook),
            soc_instagram: present(row.soc_instagram),
            soc_youtube: present(row.soc_youtube),
            soc_customlink: present(row.soc_customlink),
            wrk_org: present(row.wrk_org),
            wkr_email: present(row.wkr_email),
            wrk_title: present(row.wrk_title),
            wrk_role: present(row.wrk_role),
            wrk_url: present(row.wrk_url),
            wa_street: present(row.wa_street),
            wa_city: present(row.wa_city),
            wa_state: present(row.wa_state),
            wa_postal_code: present(row.wa_postal_code),
            wa_country: present(row.wa_country),
        };
        VCardRecord {
            vcard_id: row.vcard_id,
            created_at: row.created_at,
            contact,
        }
    }
}

/// Insert a validated card and return its `vcard_id`.
///
/// A suffix id that does not exist fails with `InvalidReference` and
/// nothing is written.
pub async fn create(pool: &SqlitePool, data: &ContactData) -> RepoResult<i64> {
    let now = now_millis();
    let f = |field: ContactField| data.get(field);

    let mut tx = pool.begin().await?;

    if let Some(suffix) = data.vcard_suffix {
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM suffixes WHERE id = ?")
            .bind(suffix)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(RepoError::InvalidReference {
                field: "vcard_suffix",
                code: ErrorCode::SuffixNotFound,
                message: "The selected vcard suffix is invalid.".to_string(),
            });
        }
    }

    let (vcard_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO full_names (vcard_fname, vcard_mname, vcard_lname, vcard_suffix, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING vcard_id
        "#,
    )
    .bind(f(ContactField::FirstName).unwrap_or_default())
    .bind(f(ContactField::MiddleName))
    .bind(f(ContactField::LastName).unwrap_or_default())
    .bind(data.vcard_suffix)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO contacts (vcard_id, con_email, con_phone, created_at) VALUES (?, ?, ?, ?)")
        .bind(vcard_id)
        .bind(f(ContactField::Email))
        .bind(f(ContactField::Phone))
        .bind(now)
        .execute(&mut *tx)
        .await?;

    sqlx::query("INSERT INTO images (vcard_id, img_photo, img_logo, created_at) VALUES (?, ?, ?, ?)")
        .bind(vcard_id)
        .bind(f(ContactField::Photo))
        .bind(f(ContactField::Logo))
        .bind(now)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO socials (
            vcard_id, soc_linkedin, soc_twitter, soc_facebook,
            soc_instagram, soc_youtube, soc_customlink, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(vcard_id)
    .bind(f(ContactField::Linkedin))
    .bind(f(ContactField::Twitter))
    .bind(f(ContactField::Facebook))
    .bind(f(ContactField::Instagram))
    .bind(f(ContactField::Youtube))
    .bind(f(ContactField::CustomLink))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO works (vcard_id, wrk_org, wkr_email, wrk_title, wrk_role, wrk_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(vcard_id)
    .bind(f(ContactField::Organization))
    .bind(f(ContactField::WorkEmail))
    .bind(f(ContactField::Title))
    .bind(f(ContactField::Role))
    .bind(f(ContactField::Website))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if data.has_work_address() {
        sqlx::query(
            r#"
            INSERT INTO work_addresses (
                vcard_id, wa_street, wa_city, wa_state, wa_postal_code, wa_country, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(vcard_id)
        .bind(f(ContactField::Street).unwrap_or_default())
        .bind(f(ContactField::City).unwrap_or_default())
        .bind(f(ContactField::State).unwrap_or_default())
        .bind(f(ContactField::PostalCode).unwrap_or_default())
        .bind(f(ContactField::Country).unwrap_or_default())
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(vcard_id)
}

/// Read a stored card back as form data
pub async fn find_by_id(pool: &SqlitePool, vcard_id: i64) -> RepoResult<Option<VCardRecord>> {
    let row = sqlx::query_as::<_, VCardRow>(
        r#"
        SELECT
            f.vcard_id, f.vcard_fname, f.vcard_mname, f.vcard_lname, f.vcard_suffix, f.created_at,
            c.con_email, c.con_phone,
            i.img_photo, i.img_logo,
            s.soc_linkedin, s.soc_twitter, s.soc_facebook,
            s.soc_instagram, s.soc_youtube, s.soc_customlink,
            w.wrk_org, w.wkr_email, w.wrk_title, w.wrk_role, w.wrk_url,
            a.wa_street, a.wa_city, a.wa_state, a.wa_postal_code, a.wa_country
        FROM full_names f
        LEFT JOIN contacts c ON c.vcard_id = f.vcard_id
        LEFT JOIN images i ON i.vcard_id = f.vcard_id
        LEFT JOIN socials s ON s.vcard_id = f.vcard_id
        LEFT JOIN works w ON w.vcard_id = f.vcard_id
        LEFT JOIN work_addresses a ON a.vcard_id = f.vcard_id
        WHERE f.vcard_id = ?
        "#,
    )
    .bind(vcard_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(VCardRecord::from))
}

/// Suffix display text for a card ("None" yields nothing)
pub async fn suffix_text(pool: &SqlitePool, data: &ContactData) -> RepoResult<Option<String>> {
    let Some(id) = data.vcard_suffix else {
        return Ok(None);
    };
    let suffix = super::suffix::find_by_id(pool, id).await?;
    Ok(suffix.and_then(|s| s.display().map(str::to_string)))
}
