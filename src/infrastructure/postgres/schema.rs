diesel::table! {
    users (id) {
        id -> Uuid,
        username -> Text,
        email -> Text,
        first_name -> Text,
        last_name -> Text,
        bio -> Nullable<Text>,
        avatar -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    plans (id) {
        id -> Uuid,
        name -> Text,
        price_minor -> Int4,
        duration_days -> Int4,
        features -> Jsonb,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    subscriptions (id) {
        id -> Uuid,
        user_id -> Uuid,
        plan_id -> Uuid,
        status -> Text,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        auto_renew -> Bool,
        canceled_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    pinned_posts (id) {
        id -> Uuid,
        user_id -> Uuid,
        post_id -> Uuid,
        pinned_at -> Timestamptz,
    }
}

diesel::table! {
    subscription_history (id) {
        id -> Uuid,
        subscription_id -> Uuid,
        action -> Text,
        description -> Text,
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    posts (id) {
        id -> Uuid,
        author_id -> Uuid,
        title -> Text,
        slug -> Text,
        content -> Text,
        image -> Nullable<Text>,
        category -> Nullable<Text>,
        views_count -> Int4,
        comments_count -> Int4,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(subscriptions -> plans (plan_id));
diesel::joinable!(subscriptions -> users (user_id));
diesel::joinable!(subscription_history -> subscriptions (subscription_id));
diesel::joinable!(pinned_posts -> posts (post_id));
diesel::joinable!(pinned_posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    plans,
    subscriptions,
    pinned_posts,
    subscription_history,
    posts,
);
