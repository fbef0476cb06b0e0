// Mirrors migrations/2024-01-01-000000_initial/up.sql.

diesel::table! {
    daily_tracking (id) {
        id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
        peptide1_id -> Nullable<Uuid>,
        peptide2_id -> Nullable<Uuid>,
        peptide3_id -> Nullable<Uuid>,
        weight_lbs -> Nullable<Float8>,
        waist_in -> Nullable<Float8>,
        bp_am -> Nullable<Text>,
        bp_pm -> Nullable<Text>,
        body_fat_pct -> Nullable<Float8>,
        muscle_mass_pct -> Nullable<Float8>,
        resting_hr_bpm -> Nullable<Float8>,
        energy -> Nullable<Int4>,
        appetite -> Nullable<Int4>,
        performance -> Nullable<Int4>,
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    peptides (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        units_remaining -> Nullable<Float8>,
        expires_on -> Nullable<Date>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    supplements (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        dose -> Nullable<Text>,
        schedule -> Nullable<Text>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    schedules (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        item_type -> Nullable<Text>,
        item_id -> Nullable<Uuid>,
        dose -> Nullable<Text>,
        frequency -> Text,
        weekday -> Nullable<Int2>,
        start_date -> Date,
        end_date -> Nullable<Date>,
        time_of_day -> Nullable<Text>,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    cycles (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Text,
        status -> Text,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    labs (id) {
        id -> Uuid,
        user_id -> Uuid,
        panel_name -> Text,
        values -> Jsonb,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    insights (id) {
        id -> Uuid,
        user_id -> Uuid,
        source_type -> Text,
        source_id -> Nullable<Uuid>,
        content -> Nullable<Text>,
        summary -> Nullable<Jsonb>,
        tips -> Nullable<Jsonb>,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    daily_tracking,
    peptides,
    supplements,
    schedules,
    cycles,
    labs,
    insights,
);
